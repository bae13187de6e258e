//! Operational migration scripts.
//!
//! The revert script opens a fresh connection from the module's database
//! config, rolls the module's migrations back, and closes the connection
//! again. It is used by one-shot tooling where there is no caller to hand an
//! error to: failures are logged and swallowed, and the connection is closed
//! regardless of the outcome.

use sea_orm_migration::MigrationTrait;
use tracing::{error, info, warn};

use crate::config::DatabaseConfig;

fn upper_case_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Revert a module's migrations against its configured database.
///
/// Connection setup and revert failures are logged, not returned; callers
/// can only observe them through log output. The connection is always
/// closed, best-effort.
pub async fn revert_module_migrations(
    module_name: &str,
    config: &DatabaseConfig,
    migrations: Vec<Box<dyn MigrationTrait>>,
) {
    let display_name = upper_case_first(module_name);

    let db = match commerce_db::connect_db(&config.url, config.pool.clone()).await {
        Ok(db) => db,
        Err(e) => {
            error!("{display_name} module migration failed to run - Error: {e}");
            return;
        }
    };

    match commerce_db::revert_migrations_for_module(&db, module_name, migrations).await {
        Ok(result) => {
            info!(
                reverted = result.reverted,
                "{display_name} module migration executed"
            );
        }
        Err(e) => {
            error!("{display_name} module migration failed to run - Error: {e}");
        }
    }

    if let Err(e) = db.close().await {
        warn!(module = module_name, error = %e, "failed to close connection after revert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce_db::{connect_db, run_migrations_for_module, ConnectOpts};
    use sea_orm::ConnectionTrait;
    use sea_orm_migration::prelude::*;

    #[test]
    fn upper_case_first_handles_edge_cases() {
        assert_eq!(upper_case_first("region"), "Region");
        assert_eq!(upper_case_first("Payment"), "Payment");
        assert_eq!(upper_case_first(""), "");
    }

    struct CreateThings;

    impl MigrationName for CreateThings {
        fn name(&self) -> &str {
            "m001_create_things"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for CreateThings {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .get_connection()
                .execute_unprepared("CREATE TABLE things (id INTEGER PRIMARY KEY)")
                .await?;
            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .get_connection()
                .execute_unprepared("DROP TABLE things")
                .await?;
            Ok(())
        }
    }

    struct BrokenDown;

    impl MigrationName for BrokenDown {
        fn name(&self) -> &str {
            "m001_create_things"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for BrokenDown {
        async fn up(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
            Ok(())
        }

        async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
            Err(DbErr::Custom("down failed on purpose".to_owned()))
        }
    }

    fn file_db_config(dir: &tempfile::TempDir) -> DatabaseConfig {
        let path = dir.path().join("revert.sqlite");
        DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            pool: ConnectOpts::default(),
        }
    }

    #[tokio::test]
    async fn revert_script_rolls_schema_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = file_db_config(&dir);

        // Apply the migration through a separate connection first.
        let db = connect_db(&cfg.url, cfg.pool.clone()).await.expect("connect");
        run_migrations_for_module(&db, "things", vec![Box::new(CreateThings)])
            .await
            .expect("migrate up");
        db.close().await.expect("close");

        revert_module_migrations("things", &cfg, vec![Box::new(CreateThings)]).await;

        // Table is gone after the revert.
        let db = connect_db(&cfg.url, cfg.pool.clone()).await.expect("reconnect");
        let row = db
            .sea()
            .query_one(sea_orm::Statement::from_string(
                db.sea().get_database_backend(),
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='things'"
                    .to_owned(),
            ))
            .await
            .expect("query")
            .expect("row");
        let count: i32 = row.try_get_by_index(0).expect("count");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn revert_script_swallows_down_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = file_db_config(&dir);

        let db = connect_db(&cfg.url, cfg.pool.clone()).await.expect("connect");
        run_migrations_for_module(&db, "broken", vec![Box::new(BrokenDown)])
            .await
            .expect("migrate up");
        db.close().await.expect("close");

        // Does not panic or propagate the failure.
        revert_module_migrations("broken", &cfg, vec![Box::new(BrokenDown)]).await;

        // The failed revert left the history record in place.
        let db = connect_db(&cfg.url, cfg.pool.clone()).await.expect("reconnect");
        let result = run_migrations_for_module(&db, "broken", vec![Box::new(BrokenDown)])
            .await
            .expect("re-run");
        assert_eq!(result.skipped, 1);
    }

    #[tokio::test]
    async fn revert_script_survives_bad_connection() {
        let cfg = DatabaseConfig {
            url: "sqlite:///nonexistent-dir/nope.sqlite".to_owned(),
            pool: ConnectOpts::default(),
        };

        // Only observable through logs, per the script's contract.
        revert_module_migrations("ghost", &cfg, vec![Box::new(CreateThings)]).await;
    }
}
