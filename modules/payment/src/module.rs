use std::sync::Arc;

use async_trait::async_trait;
use commerce_runtime::{Module, ModuleCtx};
use tracing::info;

use crate::loader::{built_in_factories, register_providers, PaymentModuleOptions};
use crate::provider::PaymentProviderFactory;

/// Payment module: registers configured payment providers on init.
///
/// Hosts can extend the built-in factory set with their own through
/// [`PaymentModule::with_factories`].
pub struct PaymentModule {
    factories: Vec<Arc<dyn PaymentProviderFactory>>,
}

impl PaymentModule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: built_in_factories(),
        }
    }

    /// Built-in factories plus the given extras.
    #[must_use]
    pub fn with_factories(extra: Vec<Arc<dyn PaymentProviderFactory>>) -> Self {
        let mut factories = built_in_factories();
        factories.extend(extra);
        Self { factories }
    }
}

impl Default for PaymentModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for PaymentModule {
    fn name(&self) -> &'static str {
        "payment"
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let options: PaymentModuleOptions = ctx.config()?;
        register_providers(ctx.providers(), &self.factories, &options)?;

        info!(
            providers = ctx.providers().collection(crate::PAYMENT_PROVIDERS).len(),
            "payment module initialized"
        );
        Ok(())
    }
}
