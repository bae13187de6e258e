//! Provider registration loader.
//!
//! Walks the configured provider entries, matches each against a known
//! factory and registers one provider instance per config entry. Keys are
//! `pp_<PROVIDER>_<configKey>`; every key is also appended to the
//! `payment_providers` collection so consumers can enumerate what is
//! installed.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use commerce_runtime::ProviderHub;

use crate::provider::{PaymentProvider, PaymentProviderFactory};
use crate::system::SystemProviderFactory;

/// Collection holding every registered provider key.
pub const PAYMENT_PROVIDERS: &str = "payment_providers";

const REGISTRATION_PREFIX: &str = "pp_";

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("unknown payment provider '{id}'")]
    UnknownProvider { id: String },

    #[error("payment provider '{id}' rejected config entry '{config_key}': {source}")]
    InvalidProviderConfig {
        id: String,
        config_key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// One configured provider: which factory to use and one config value per
/// registration. A provider with two config entries is registered twice.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderEntry {
    pub id: String,
    /// Config-key to provider-config map; `serde_json::Map` keeps iteration
    /// order stable across runs.
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentModuleOptions {
    pub providers: Vec<ProviderEntry>,
}

fn registration_key(provider_id: &str, config_key: &str) -> String {
    format!("{REGISTRATION_PREFIX}{provider_id}_{config_key}")
}

/// The factories shipped with this module.
#[must_use]
pub fn built_in_factories() -> Vec<Arc<dyn PaymentProviderFactory>> {
    vec![Arc::new(SystemProviderFactory)]
}

/// Register every configured provider instance into the hub.
///
/// # Errors
/// Returns [`LoaderError::UnknownProvider`] when an entry names a provider
/// no factory matches, and [`LoaderError::InvalidProviderConfig`] when a
/// factory rejects one of its config entries. Registration stops at the
/// first failure.
pub fn register_providers(
    hub: &ProviderHub,
    factories: &[Arc<dyn PaymentProviderFactory>],
    options: &PaymentModuleOptions,
) -> Result<(), LoaderError> {
    for entry in &options.providers {
        let factory = factories
            .iter()
            .find(|f| f.provider_id() == entry.id)
            .ok_or_else(|| LoaderError::UnknownProvider {
                id: entry.id.clone(),
            })?;

        for (config_key, config) in &entry.config {
            let provider =
                factory
                    .create(config)
                    .map_err(|source| LoaderError::InvalidProviderConfig {
                        id: entry.id.clone(),
                        config_key: config_key.clone(),
                        source,
                    })?;

            let key = registration_key(factory.provider_id(), config_key);
            debug!(key = %key, "registering payment provider");
            hub.register::<dyn PaymentProvider>(&*key, provider);
            hub.push_collection(PAYMENT_PROVIDERS, key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::AuthorizeOutcome;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn options(value: serde_json::Value) -> PaymentModuleOptions {
        serde_json::from_value(value).expect("valid options")
    }

    #[test]
    fn registers_one_provider_per_config_entry() {
        let hub = ProviderHub::new();
        let opts = options(json!({
            "providers": [
                { "id": "system", "config": { "default": {}, "capped": { "max_amount": "10" } } }
            ]
        }));

        register_providers(&hub, &built_in_factories(), &opts).expect("load");

        assert!(hub.contains::<dyn PaymentProvider>("pp_system_default"));
        assert!(hub.contains::<dyn PaymentProvider>("pp_system_capped"));
        let mut keys = hub.collection(PAYMENT_PROVIDERS);
        keys.sort();
        assert_eq!(
            keys,
            vec!["pp_system_capped".to_owned(), "pp_system_default".to_owned()]
        );
    }

    #[test]
    fn unknown_provider_id_fails() {
        let hub = ProviderHub::new();
        let opts = options(json!({
            "providers": [{ "id": "stripe", "config": { "main": {} } }]
        }));

        let err = register_providers(&hub, &built_in_factories(), &opts).unwrap_err();
        assert!(matches!(err, LoaderError::UnknownProvider { id } if id == "stripe"));
        assert!(hub.collection(PAYMENT_PROVIDERS).is_empty());
    }

    #[test]
    fn invalid_config_names_the_entry() {
        let hub = ProviderHub::new();
        let opts = options(json!({
            "providers": [{ "id": "system", "config": { "broken": { "max_amount": [] } } }]
        }));

        let err = register_providers(&hub, &built_in_factories(), &opts).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn entry_without_config_registers_nothing() {
        let hub = ProviderHub::new();
        let opts = options(json!({ "providers": [{ "id": "system" }] }));

        register_providers(&hub, &built_in_factories(), &opts).expect("load");
        assert!(hub.is_empty());
    }

    #[tokio::test]
    async fn registered_provider_is_usable_from_the_hub() {
        let hub = ProviderHub::new();
        let opts = options(json!({
            "providers": [{ "id": "system", "config": { "main": {} } }]
        }));
        register_providers(&hub, &built_in_factories(), &opts).expect("load");

        let provider = hub
            .get::<dyn PaymentProvider>("pp_system_main")
            .expect("registered");
        let out = provider
            .authorize(Decimal::new(25, 0), "eur")
            .await
            .expect("authorize");
        assert!(matches!(out, AuthorizeOutcome::Authorized { .. }));
    }
}
