//! Database abstraction for commerce modules.
//!
//! Provides a thin [`Db`] handle over a sea-orm connection, typed connection
//! options, generic list options for repositories, and a per-module
//! migration runner with its own history table per module.
//!
//! Backend features: `pg`, `mysql`, `sqlite`.

pub mod find;
pub mod migration_runner;

pub use find::{FindConfig, OrderBy, SortDir};
pub use migration_runner::{
    revert_migrations_for_module, run_migrations_for_module, MigrationError, MigrationResult,
    RevertResult,
};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Pool and connection knobs mapped onto [`sea_orm::ConnectOptions`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct ConnectOpts {
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a connection from the pool.
    pub connect_timeout_secs: u64,
    /// Seconds before an idle connection is reaped.
    pub idle_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            sqlx_logging: false,
        }
    }
}

/// Handle over a live database connection.
///
/// Owned by the runtime; modules receive it through their context and never
/// hold raw driver pools.
#[derive(Debug)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    /// Borrow the underlying sea-orm connection.
    #[must_use]
    pub fn sea(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Close the connection, consuming the handle.
    ///
    /// # Errors
    /// Returns the driver error if the pool fails to shut down cleanly.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close().await
    }
}

/// Open a database connection from a URL and pool options.
///
/// # Errors
/// Returns [`DbErr`] when the URL is invalid or the connection cannot be
/// established.
pub async fn connect_db(url: &str, opts: ConnectOpts) -> Result<Db, DbErr> {
    let mut conn_opts = ConnectOptions::new(url.to_owned());
    conn_opts
        .max_connections(opts.max_connections)
        .min_connections(opts.min_connections)
        .connect_timeout(Duration::from_secs(opts.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(opts.idle_timeout_secs))
        .sqlx_logging(opts.sqlx_logging);

    let conn = Database::connect(conn_opts).await?;
    Ok(Db { conn })
}
