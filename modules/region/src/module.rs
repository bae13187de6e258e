use std::sync::Arc;

use async_trait::async_trait;
use commerce_runtime::{DbModule, Module, ModuleCtx};
use sea_orm_migration::MigrationTrait;
use tracing::{debug, info};

use crate::domain::CountryRepository;
use crate::infra::storage::{migrations, sea_orm_repo::SeaOrmCountryRepository};

/// Registration key for the country repository in the provider hub.
pub const COUNTRY_REPOSITORY: &str = "country_repository";

/// Region module: owns the `region_country` schema and provides the
/// country repository to the rest of the system.
#[derive(Default)]
pub struct RegionModule;

#[async_trait]
impl Module for RegionModule {
    fn name(&self) -> &'static str {
        "region"
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let models = crate::models::dml_models()?;
        debug!(
            models = ?models.iter().map(|m| m.name().to_owned()).collect::<Vec<_>>(),
            "region module models"
        );

        let repo: Arc<dyn CountryRepository> =
            Arc::new(SeaOrmCountryRepository::new(ctx.db_required()?));
        ctx.providers()
            .register::<dyn CountryRepository>(COUNTRY_REPOSITORY, repo);

        info!("region module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for RegionModule {
    fn migrations(&self) -> Vec<Box<dyn MigrationTrait>> {
        migrations::all()
    }

    async fn migrate(&self, db: &commerce_db::Db) -> anyhow::Result<()> {
        commerce_db::run_migrations_for_module(db, self.name(), self.migrations()).await?;
        Ok(())
    }
}
