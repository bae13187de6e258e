use std::sync::Arc;

use async_trait::async_trait;
use commerce_runtime::{DbModule, Module, ModuleCtx};
use sea_orm_migration::MigrationTrait;
use tracing::{debug, info};

use crate::domain::{ProductTagRepository, ProductTagService};
use crate::infra::storage::{migrations, sea_orm_repo::SeaOrmProductTagRepository};

/// Registration key for the product tag service in the provider hub.
pub const PRODUCT_TAG_SERVICE: &str = "product_tag_service";

/// Product module: owns the `product_tag` schema and provides the tag
/// query service.
#[derive(Default)]
pub struct ProductModule;

#[async_trait]
impl Module for ProductModule {
    fn name(&self) -> &'static str {
        "product"
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let models = crate::models::dml_models()?;
        debug!(
            models = ?models.iter().map(|m| m.name().to_owned()).collect::<Vec<_>>(),
            "product module models"
        );

        let repo: Arc<dyn ProductTagRepository> =
            Arc::new(SeaOrmProductTagRepository::new(ctx.db_required()?));
        let service = Arc::new(ProductTagService::new(repo));
        ctx.providers()
            .register::<ProductTagService>(PRODUCT_TAG_SERVICE, service);

        info!("product module initialized");
        Ok(())
    }
}

#[async_trait]
impl DbModule for ProductModule {
    fn migrations(&self) -> Vec<Box<dyn MigrationTrait>> {
        migrations::all()
    }

    async fn migrate(&self, db: &commerce_db::Db) -> anyhow::Result<()> {
        commerce_db::run_migrations_for_module(db, self.name(), self.migrations()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterableProductTagProps;
    use commerce_db::{connect_db, ConnectOpts, FindConfig};
    use commerce_runtime::{JsonConfigProvider, ProviderHub};
    use serde_json::json;

    #[tokio::test]
    async fn migrate_then_init_registers_service() {
        let db = Arc::new(
            connect_db("sqlite::memory:", ConnectOpts::default())
                .await
                .expect("connect"),
        );
        let module = ProductModule;

        module.migrate(&db).await.expect("migrate");

        let hub = Arc::new(ProviderHub::new());
        let ctx = ModuleCtx::new(
            "product",
            Arc::new(JsonConfigProvider::new(json!({}))),
            hub.clone(),
            Some(db),
        );
        module.init(&ctx).await.expect("init");

        let service = hub
            .get::<ProductTagService>(PRODUCT_TAG_SERVICE)
            .expect("registered");
        let tags = service
            .list(FilterableProductTagProps::default(), &FindConfig::new())
            .await
            .expect("list");
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn init_fails_without_database() {
        let module = ProductModule;
        let ctx = ModuleCtx::new(
            "product",
            Arc::new(JsonConfigProvider::new(json!({}))),
            Arc::new(ProviderHub::new()),
            None,
        );
        let err = module.init(&ctx).await.unwrap_err();
        assert!(err.to_string().contains("product"));
    }
}
