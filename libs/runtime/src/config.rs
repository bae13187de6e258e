//! Typed access to per-module configuration.
//!
//! A [`ConfigProvider`] hands out raw JSON sections keyed by module name;
//! each section looks like `{ "database": {...}, "config": {...} }`. Two
//! loaders cover the two module styles:
//!
//! - [`module_config_or_default`]: lenient; a missing section falls back to
//!   `T::default()`.
//! - [`module_config_required`]: strict; missing or malformed sections are
//!   errors.

use serde::de::DeserializeOwned;

/// Configuration error for typed config operations.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("module '{module}' not found")]
    ModuleNotFound { module: String },

    #[error("module '{module}' config must be an object")]
    InvalidModuleStructure { module: String },

    #[error("missing 'config' section in module '{module}'")]
    MissingConfigSection { module: String },

    #[error("invalid config for module '{module}': {source}")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing 'database' section in module '{module}'")]
    MissingDatabaseSection { module: String },

    #[error("invalid database config for module '{module}': {source}")]
    InvalidDatabaseConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns the raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Static config provider backed by a single JSON document keyed by module
/// name. The common choice for tests and one-shot scripts.
pub struct JsonConfigProvider {
    root: serde_json::Value,
}

impl JsonConfigProvider {
    #[must_use]
    pub fn new(root: serde_json::Value) -> Self {
        Self { root }
    }
}

impl ConfigProvider for JsonConfigProvider {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.root.get(module_name)
    }
}

/// Lenient configuration loader that falls back to defaults.
///
/// # Errors
/// Returns [`ConfigError::InvalidConfig`] only when a `config` section is
/// present but cannot be deserialized.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(module_raw) = provider.get_module_config(module_name) else {
        return Ok(T::default());
    };

    let Some(obj) = module_raw.as_object() else {
        return Ok(T::default());
    };

    let Some(config_section) = obj.get("config") else {
        return Ok(T::default());
    };

    let config: T =
        serde_json::from_value(config_section.clone()).map_err(|e| ConfigError::InvalidConfig {
            module: module_name.to_owned(),
            source: e,
        })?;

    Ok(config)
}

/// Strict configuration loader that requires the section to be present.
///
/// # Errors
/// Returns [`ConfigError`] if the module is not found, has invalid
/// structure, or the `config` section is missing or invalid.
pub fn module_config_required<T: DeserializeOwned>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let module_raw =
        provider
            .get_module_config(module_name)
            .ok_or_else(|| ConfigError::ModuleNotFound {
                module: module_name.to_owned(),
            })?;

    let obj = module_raw
        .as_object()
        .ok_or_else(|| ConfigError::InvalidModuleStructure {
            module: module_name.to_owned(),
        })?;

    let config_section = obj
        .get("config")
        .ok_or_else(|| ConfigError::MissingConfigSection {
            module: module_name.to_owned(),
        })?;

    let config: T = serde_json::from_value(config_section.clone()).map_err(|e| {
        ConfigError::InvalidConfig {
            module: module_name.to_owned(),
            source: e,
        }
    })?;

    Ok(config)
}

/// Database settings of a module: connection URL plus pool knobs.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default)]
    pub pool: commerce_db::ConnectOpts,
}

/// Load the `database` section of a module's configuration.
///
/// # Errors
/// Returns [`ConfigError`] when the module or its `database` section is
/// missing, or the section cannot be deserialized.
pub fn load_database_config(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<DatabaseConfig, ConfigError> {
    let module_raw =
        provider
            .get_module_config(module_name)
            .ok_or_else(|| ConfigError::ModuleNotFound {
                module: module_name.to_owned(),
            })?;

    let section = module_raw
        .get("database")
        .ok_or_else(|| ConfigError::MissingDatabaseSection {
            module: module_name.to_owned(),
        })?;

    serde_json::from_value(section.clone()).map_err(|e| ConfigError::InvalidDatabaseConfig {
        module: module_name.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct TestConfig {
        #[serde(default)]
        flag: bool,
        #[serde(default)]
        limit: u32,
    }

    fn provider(root: serde_json::Value) -> JsonConfigProvider {
        JsonConfigProvider::new(root)
    }

    #[test]
    fn lenient_loader_defaults_when_module_missing() {
        let p = provider(json!({}));
        let cfg: TestConfig = module_config_or_default(&p, "payment").unwrap();
        assert_eq!(cfg, TestConfig::default());
    }

    #[test]
    fn lenient_loader_reads_config_section() {
        let p = provider(json!({
            "payment": { "config": { "flag": true, "limit": 3 } }
        }));
        let cfg: TestConfig = module_config_or_default(&p, "payment").unwrap();
        assert!(cfg.flag);
        assert_eq!(cfg.limit, 3);
    }

    #[test]
    fn lenient_loader_rejects_malformed_config() {
        let p = provider(json!({
            "payment": { "config": { "limit": "not a number" } }
        }));
        let err = module_config_or_default::<TestConfig>(&p, "payment").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn strict_loader_requires_module_and_section() {
        let p = provider(json!({}));
        let err = module_config_required::<TestConfig>(&p, "payment").unwrap_err();
        assert!(matches!(err, ConfigError::ModuleNotFound { .. }));

        let p = provider(json!({ "payment": {} }));
        let err = module_config_required::<TestConfig>(&p, "payment").unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfigSection { .. }));
    }

    #[test]
    fn database_config_loads_url_and_pool() {
        let p = provider(json!({
            "region": {
                "database": {
                    "url": "postgres://localhost/commerce",
                    "pool": { "max_connections": 5 }
                }
            }
        }));

        let cfg = load_database_config(&p, "region").unwrap();
        assert_eq!(cfg.url, "postgres://localhost/commerce");
        assert_eq!(cfg.pool.max_connections, 5);
        // Unset knobs keep their defaults.
        assert_eq!(cfg.pool.min_connections, 1);
    }

    #[test]
    fn database_config_missing_section_is_an_error() {
        let p = provider(json!({ "region": { "config": {} } }));
        let err = load_database_config(&p, "region").unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseSection { .. }));
    }
}
