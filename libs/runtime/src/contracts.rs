use async_trait::async_trait;
use sea_orm_migration::MigrationTrait;

/// Core module lifecycle: wiring and service registration.
///
/// `init` runs after migrations; register provided services into the
/// [`crate::ProviderHub`] here and resolve dependencies from it.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    /// Stable module name, used for config sections and migration history.
    fn name(&self) -> &'static str;

    async fn init(&self, ctx: &crate::context::ModuleCtx) -> anyhow::Result<()>;
}

/// Modules that own database schema.
///
/// `migrate` runs BEFORE `init`; modules only hand migration definitions to
/// the runner and never receive raw driver access.
#[async_trait]
pub trait DbModule: Send + Sync {
    /// Migration definitions, in any order; the runner sorts by name.
    fn migrations(&self) -> Vec<Box<dyn MigrationTrait>>;

    async fn migrate(&self, db: &commerce_db::Db) -> anyhow::Result<()>;
}
