use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        match backend {
            sea_orm::DatabaseBackend::Postgres => {
                conn.execute_unprepared(
                    r#"alter table if exists "region_country" add column if not exists "metadata" jsonb null, add column "created_at" timestamptz not null default now(), add column "updated_at" timestamptz not null default now(), add column "deleted_at" timestamptz null;"#,
                )
                .await?;
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite cannot add multiple columns in one statement and
                // requires constant defaults on ADD COLUMN.
                conn.execute_unprepared(
                    r#"ALTER TABLE "region_country" ADD COLUMN "metadata" jsonb NULL;"#,
                )
                .await?;
                conn.execute_unprepared(
                    r#"ALTER TABLE "region_country" ADD COLUMN "created_at" TEXT NOT NULL DEFAULT '1970-01-01T00:00:00+00:00';"#,
                )
                .await?;
                conn.execute_unprepared(
                    r#"ALTER TABLE "region_country" ADD COLUMN "updated_at" TEXT NOT NULL DEFAULT '1970-01-01T00:00:00+00:00';"#,
                )
                .await?;
                conn.execute_unprepared(
                    r#"ALTER TABLE "region_country" ADD COLUMN "deleted_at" TEXT NULL;"#,
                )
                .await?;
            }
            sea_orm::DatabaseBackend::MySql => {
                if !manager.has_column("region_country", "metadata").await? {
                    conn.execute_unprepared(
                        "ALTER TABLE region_country ADD COLUMN metadata JSON NULL;",
                    )
                    .await?;
                }
                if !manager.has_column("region_country", "created_at").await? {
                    conn.execute_unprepared(
                        "ALTER TABLE region_country ADD COLUMN created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP;",
                    )
                    .await?;
                }
                if !manager.has_column("region_country", "updated_at").await? {
                    conn.execute_unprepared(
                        "ALTER TABLE region_country ADD COLUMN updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP;",
                    )
                    .await?;
                }
                if !manager.has_column("region_country", "deleted_at").await? {
                    conn.execute_unprepared(
                        "ALTER TABLE region_country ADD COLUMN deleted_at TIMESTAMP NULL;",
                    )
                    .await?;
                }
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        match backend {
            sea_orm::DatabaseBackend::Postgres => {
                conn.execute_unprepared(
                    r#"alter table if exists "region_country" drop column if exists "metadata";"#,
                )
                .await?;
                conn.execute_unprepared(
                    r#"alter table if exists "region_country" drop column if exists "created_at";"#,
                )
                .await?;
                conn.execute_unprepared(
                    r#"alter table if exists "region_country" drop column if exists "updated_at";"#,
                )
                .await?;
                conn.execute_unprepared(
                    r#"alter table if exists "region_country" drop column if exists "deleted_at";"#,
                )
                .await?;
            }
            sea_orm::DatabaseBackend::Sqlite => {
                for column in ["metadata", "created_at", "updated_at", "deleted_at"] {
                    conn.execute_unprepared(&format!(
                        r#"ALTER TABLE "region_country" DROP COLUMN "{column}";"#
                    ))
                    .await?;
                }
            }
            sea_orm::DatabaseBackend::MySql => {
                for column in ["metadata", "created_at", "updated_at", "deleted_at"] {
                    if manager.has_column("region_country", column).await? {
                        conn.execute_unprepared(&format!(
                            "ALTER TABLE region_country DROP COLUMN {column};"
                        ))
                        .await?;
                    }
                }
            }
        }

        Ok(())
    }
}
