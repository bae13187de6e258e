use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::{
    load_database_config, module_config_or_default, module_config_required, ConfigError,
    ConfigProvider, DatabaseConfig,
};
use crate::provider_hub::ProviderHub;

/// Module execution context.
///
/// Passed to every lifecycle method; gives a module typed access to its own
/// configuration, the shared [`ProviderHub`], and an optional database
/// handle resolved by the host.
#[derive(Clone)]
pub struct ModuleCtx {
    module_name: Arc<str>,
    config_provider: Arc<dyn ConfigProvider>,
    providers: Arc<ProviderHub>,
    db: Option<Arc<commerce_db::Db>>,
}

impl ModuleCtx {
    #[must_use]
    pub fn new(
        module_name: impl Into<Arc<str>>,
        config_provider: Arc<dyn ConfigProvider>,
        providers: Arc<ProviderHub>,
        db: Option<Arc<commerce_db::Db>>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            config_provider,
            providers,
            db,
        }
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Load this module's `config` section, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidConfig`] when the section exists but
    /// cannot be deserialized.
    pub fn config<T: DeserializeOwned + Default>(&self) -> Result<T, ConfigError> {
        module_config_or_default(self.config_provider.as_ref(), &self.module_name)
    }

    /// Load this module's `config` section, requiring it to be present.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the section is missing or invalid.
    pub fn config_required<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        module_config_required(self.config_provider.as_ref(), &self.module_name)
    }

    /// Load this module's `database` section.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the section is missing or invalid.
    pub fn database_config(&self) -> Result<DatabaseConfig, ConfigError> {
        load_database_config(self.config_provider.as_ref(), &self.module_name)
    }

    #[must_use]
    pub fn providers(&self) -> &Arc<ProviderHub> {
        &self.providers
    }

    #[must_use]
    pub fn db_optional(&self) -> Option<Arc<commerce_db::Db>> {
        self.db.clone()
    }

    /// Database handle, erroring when the module has none configured.
    ///
    /// # Errors
    /// Returns an error if no database was resolved for this module.
    pub fn db_required(&self) -> anyhow::Result<Arc<commerce_db::Db>> {
        self.db.clone().ok_or_else(|| {
            anyhow::anyhow!("module '{}' has no database configured", self.module_name)
        })
    }
}
