//! Per-module migration runner.
//!
//! Each module keeps its own migration history table named
//! `commerce_migrations__<prefix>__<hash8>`, where `<hash8>` is derived from
//! the original module name via `xxh3_64`. Modules only provide migration
//! definitions through [`MigrationTrait`]; the runtime executes them with its
//! own connection.
//!
//! Execution is deterministic (name-sorted) and idempotent: already-recorded
//! migrations are skipped on re-runs. Each migration runs together with its
//! history record inside a best-effort transaction.

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DbErr, FromQueryResult, Statement, TransactionTrait,
};
use sea_orm_migration::MigrationTrait;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_64;

/// Errors that can occur while running or reverting module migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to create migration history table for module '{module}': {source}")]
    CreateTable { module: String, source: DbErr },

    #[error("failed to query migration history for module '{module}': {source}")]
    QueryHistory { module: String, source: DbErr },

    #[error("migration '{migration}' failed for module '{module}': {source}")]
    MigrationFailed {
        module: String,
        migration: String,
        source: DbErr,
    },

    #[error("migration '{migration}' failed to revert for module '{module}': {source}")]
    RevertFailed {
        module: String,
        migration: String,
        source: DbErr,
    },

    #[error("failed to update migration history '{migration}' for module '{module}': {source}")]
    RecordFailed {
        module: String,
        migration: String,
        source: DbErr,
    },

    #[error("duplicate migration name '{name}' for module '{module}'")]
    DuplicateMigrationName { module: String, name: String },
}

/// Outcome of an upward migration run.
#[derive(Debug, Clone)]
pub struct MigrationResult {
    pub applied: usize,
    pub skipped: usize,
    pub applied_names: Vec<String>,
}

/// Outcome of a revert run.
#[derive(Debug, Clone)]
pub struct RevertResult {
    pub reverted: usize,
    pub skipped: usize,
    pub reverted_names: Vec<String>,
}

#[derive(Debug, FromQueryResult)]
struct MigrationRecord {
    version: String,
}

/// Sanitize a module name into `[a-zA-Z0-9_]`; anything else becomes `_`.
fn sanitize_module_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => out.push(c),
            _ => out.push('_'),
        }
    }
    if out.is_empty() { "_".to_owned() } else { out }
}

/// Build the per-module history table name, capped to the Postgres 63-byte
/// identifier limit.
fn migration_table_name(module_name: &str) -> String {
    const PREFIX: &str = "commerce_migrations__";
    const SEP: &str = "__";
    const HASH_LEN: usize = 8;
    const PG_IDENT_MAX: usize = 63;

    let sanitized = sanitize_module_name(module_name);
    let hash = xxh3_64(module_name.as_bytes());
    let hash8 = format!("{hash:016x}")[..HASH_LEN].to_owned();

    let reserved = PREFIX.len() + SEP.len() + HASH_LEN;
    let max_prefix_len = PG_IDENT_MAX.saturating_sub(reserved);
    let prefix_part = if sanitized.len() > max_prefix_len {
        sanitized[..max_prefix_len].to_owned()
    } else {
        sanitized
    };

    format!("{PREFIX}{prefix_part}{SEP}{hash8}")
}

/// A module's migration history table.
struct HistoryTable {
    module: String,
    table: String,
}

impl HistoryTable {
    fn for_module(module_name: &str) -> Self {
        Self {
            module: module_name.to_owned(),
            table: migration_table_name(module_name),
        }
    }

    async fn ensure(&self, conn: &impl ConnectionTrait) -> Result<(), MigrationError> {
        let backend = conn.get_database_backend();
        let table = &self.table;

        let sql = match backend {
            DatabaseBackend::Postgres => format!(
                r#"
                CREATE TABLE IF NOT EXISTS "{table}" (
                    version VARCHAR(255) PRIMARY KEY,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
                )
                "#
            ),
            DatabaseBackend::MySql => format!(
                r"
                CREATE TABLE IF NOT EXISTS `{table}` (
                    version VARCHAR(255) PRIMARY KEY,
                    applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )
                "
            ),
            DatabaseBackend::Sqlite => format!(
                r#"
                CREATE TABLE IF NOT EXISTS "{table}" (
                    version TEXT PRIMARY KEY,
                    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
                )
                "#
            ),
        };

        conn.execute(Statement::from_string(backend, sql))
            .await
            .map_err(|e| MigrationError::CreateTable {
                module: self.module.clone(),
                source: e,
            })?;
        Ok(())
    }

    async fn exists(&self, conn: &impl ConnectionTrait) -> Result<bool, MigrationError> {
        let backend = conn.get_database_backend();
        let table = &self.table;

        let query_err = |e: DbErr| MigrationError::QueryHistory {
            module: self.module.clone(),
            source: e,
        };

        let exists = match backend {
            DatabaseBackend::Postgres => {
                let sql = format!(
                    "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = '{table}')"
                );
                conn.query_one(Statement::from_string(backend, sql))
                    .await
                    .map_err(query_err)?
                    .and_then(|r| r.try_get_by_index::<bool>(0).ok())
                    .unwrap_or(false)
            }
            DatabaseBackend::MySql => {
                let sql = format!(
                    "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = '{table}'"
                );
                conn.query_one(Statement::from_string(backend, sql))
                    .await
                    .map_err(query_err)?
                    .and_then(|r| r.try_get_by_index::<i64>(0).ok())
                    .is_some_and(|c| c > 0)
            }
            DatabaseBackend::Sqlite => {
                let sql = format!(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='{table}'"
                );
                conn.query_one(Statement::from_string(backend, sql))
                    .await
                    .map_err(query_err)?
                    .and_then(|r| r.try_get_by_index::<i32>(0).ok())
                    .is_some_and(|c| c > 0)
            }
        };

        Ok(exists)
    }

    async fn applied(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<HashSet<String>, MigrationError> {
        let backend = conn.get_database_backend();
        let table = &self.table;

        let sql = match backend {
            DatabaseBackend::Postgres | DatabaseBackend::Sqlite => {
                format!(r#"SELECT version FROM "{table}""#)
            }
            DatabaseBackend::MySql => format!(r"SELECT version FROM `{table}`"),
        };

        let records: Vec<MigrationRecord> =
            MigrationRecord::find_by_statement(Statement::from_string(backend, sql))
                .all(conn)
                .await
                .map_err(|e| MigrationError::QueryHistory {
                    module: self.module.clone(),
                    source: e,
                })?;

        Ok(records.into_iter().map(|r| r.version).collect())
    }

    async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        migration_name: &str,
    ) -> Result<(), MigrationError> {
        let backend = conn.get_database_backend();
        let table = &self.table;

        let sql = match backend {
            DatabaseBackend::Postgres | DatabaseBackend::Sqlite => {
                format!(r#"INSERT INTO "{table}" (version) VALUES ($1)"#)
            }
            DatabaseBackend::MySql => format!(r"INSERT INTO `{table}` (version) VALUES (?)"),
        };

        conn.execute(Statement::from_sql_and_values(
            backend,
            &sql,
            [migration_name.into()],
        ))
        .await
        .map_err(|e| MigrationError::RecordFailed {
            module: self.module.clone(),
            migration: migration_name.to_owned(),
            source: e,
        })?;
        Ok(())
    }

    async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        migration_name: &str,
    ) -> Result<(), MigrationError> {
        let backend = conn.get_database_backend();
        let table = &self.table;

        let sql = match backend {
            DatabaseBackend::Postgres | DatabaseBackend::Sqlite => {
                format!(r#"DELETE FROM "{table}" WHERE version = $1"#)
            }
            DatabaseBackend::MySql => format!(r"DELETE FROM `{table}` WHERE version = ?"),
        };

        conn.execute(Statement::from_sql_and_values(
            backend,
            &sql,
            [migration_name.into()],
        ))
        .await
        .map_err(|e| MigrationError::RecordFailed {
            module: self.module.clone(),
            migration: migration_name.to_owned(),
            source: e,
        })?;
        Ok(())
    }
}

fn reject_duplicates(
    module_name: &str,
    migrations: &[Box<dyn MigrationTrait>],
) -> Result<(), MigrationError> {
    let mut seen = HashSet::new();
    for m in migrations {
        let n = m.name().to_owned();
        if !seen.insert(n.clone()) {
            return Err(MigrationError::DuplicateMigrationName {
                module: module_name.to_owned(),
                name: n,
            });
        }
    }
    Ok(())
}

/// Run pending migrations for a module.
///
/// # Errors
/// Returns [`MigrationError`] if the history table cannot be created or
/// queried, or any migration fails to apply.
pub async fn run_migrations_for_module(
    db: &crate::Db,
    module_name: &str,
    migrations: Vec<Box<dyn MigrationTrait>>,
) -> Result<MigrationResult, MigrationError> {
    run_module_migrations(db.sea(), module_name, migrations).await
}

async fn run_module_migrations<C>(
    conn: &C,
    module_name: &str,
    migrations: Vec<Box<dyn MigrationTrait>>,
) -> Result<MigrationResult, MigrationError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if migrations.is_empty() {
        debug!(module = module_name, "no migrations to run");
        return Ok(MigrationResult {
            applied: 0,
            skipped: 0,
            applied_names: vec![],
        });
    }

    reject_duplicates(module_name, &migrations)?;

    let history = HistoryTable::for_module(module_name);
    history.ensure(conn).await?;
    let applied = history.applied(conn).await?;

    let mut sorted: Vec<_> = migrations.into_iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    let mut result = MigrationResult {
        applied: 0,
        skipped: 0,
        applied_names: vec![],
    };

    for migration in sorted {
        let name = migration.name().to_owned();

        if applied.contains(&name) {
            debug!(module = module_name, migration = %name, "already applied, skipping");
            result.skipped += 1;
            continue;
        }

        info!(module = module_name, migration = %name, "applying migration");

        // Migration and history record commit together. Some backends
        // auto-commit DDL, so this stays best-effort.
        let txn = conn
            .begin()
            .await
            .map_err(|e| MigrationError::MigrationFailed {
                module: module_name.to_owned(),
                migration: name.clone(),
                source: e,
            })?;

        let manager = sea_orm_migration::SchemaManager::new(&txn);
        let res: Result<(), MigrationError> = (async {
            migration
                .up(&manager)
                .await
                .map_err(|e| MigrationError::MigrationFailed {
                    module: module_name.to_owned(),
                    migration: name.clone(),
                    source: e,
                })?;
            history.insert(&txn, &name).await
        })
        .await;

        match res {
            Ok(()) => {
                txn.commit()
                    .await
                    .map_err(|e| MigrationError::MigrationFailed {
                        module: module_name.to_owned(),
                        migration: name.clone(),
                        source: e,
                    })?;
            }
            Err(err) => {
                _ = txn.rollback().await;
                return Err(err);
            }
        }

        result.applied += 1;
        result.applied_names.push(name);
    }

    info!(
        module = module_name,
        applied = result.applied,
        skipped = result.skipped,
        "migration run complete"
    );

    Ok(result)
}

/// Revert applied migrations for a module, newest first.
///
/// Migrations that were never recorded as applied are skipped. Each
/// successful `down()` removes its history row in the same transaction.
///
/// # Errors
/// Returns [`MigrationError`] if the history cannot be queried or any
/// migration fails to revert.
pub async fn revert_migrations_for_module(
    db: &crate::Db,
    module_name: &str,
    migrations: Vec<Box<dyn MigrationTrait>>,
) -> Result<RevertResult, MigrationError> {
    revert_module_migrations(db.sea(), module_name, migrations).await
}

async fn revert_module_migrations<C>(
    conn: &C,
    module_name: &str,
    migrations: Vec<Box<dyn MigrationTrait>>,
) -> Result<RevertResult, MigrationError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut result = RevertResult {
        reverted: 0,
        skipped: 0,
        reverted_names: vec![],
    };

    if migrations.is_empty() {
        debug!(module = module_name, "no migrations to revert");
        return Ok(result);
    }

    reject_duplicates(module_name, &migrations)?;

    let history = HistoryTable::for_module(module_name);
    if !history.exists(conn).await? {
        debug!(module = module_name, "no migration history, nothing to revert");
        result.skipped = migrations.len();
        return Ok(result);
    }

    let applied = history.applied(conn).await?;

    // Reverse name order: newest migration goes down first.
    let mut sorted: Vec<_> = migrations.into_iter().collect();
    sorted.sort_by(|a, b| b.name().cmp(a.name()));

    for migration in sorted {
        let name = migration.name().to_owned();

        if !applied.contains(&name) {
            debug!(module = module_name, migration = %name, "not applied, skipping revert");
            result.skipped += 1;
            continue;
        }

        info!(module = module_name, migration = %name, "reverting migration");

        let txn = conn.begin().await.map_err(|e| MigrationError::RevertFailed {
            module: module_name.to_owned(),
            migration: name.clone(),
            source: e,
        })?;

        let manager = sea_orm_migration::SchemaManager::new(&txn);
        let res: Result<(), MigrationError> = (async {
            migration
                .down(&manager)
                .await
                .map_err(|e| MigrationError::RevertFailed {
                    module: module_name.to_owned(),
                    migration: name.clone(),
                    source: e,
                })?;
            history.delete(&txn, &name).await
        })
        .await;

        match res {
            Ok(()) => {
                txn.commit().await.map_err(|e| MigrationError::RevertFailed {
                    module: module_name.to_owned(),
                    migration: name.clone(),
                    source: e,
                })?;
            }
            Err(err) => {
                _ = txn.rollback().await;
                return Err(err);
            }
        }

        result.reverted += 1;
        result.reverted_names.push(name);
    }

    info!(
        module = module_name,
        reverted = result.reverted,
        skipped = result.skipped,
        "revert run complete"
    );

    Ok(result)
}
