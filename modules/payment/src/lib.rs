//! Payment module.
//!
//! Payment processing is delegated to pluggable providers. Each provider
//! ships a factory; the loader walks the configured providers, builds one
//! instance per config entry and registers it in the [`ProviderHub`] under
//! a `pp_<PROVIDER>_<configKey>` key. The full key set is tracked in the
//! `payment_providers` collection.
//!
//! [`ProviderHub`]: commerce_runtime::ProviderHub

pub mod loader;
pub mod module;
pub mod provider;
pub mod system;

pub use loader::{
    built_in_factories, register_providers, LoaderError, PaymentModuleOptions, ProviderEntry,
    PAYMENT_PROVIDERS,
};
pub use module::PaymentModule;
pub use provider::{AuthorizeOutcome, PaymentProvider, PaymentProviderFactory};
pub use system::{SystemProvider, SystemProviderConfig, SystemProviderFactory};
