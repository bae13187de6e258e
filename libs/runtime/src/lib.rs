//! Module system for the commerce backend.
//!
//! Modules are wired through three pieces:
//! - [`contracts`]: the `Module` / `DbModule` lifecycle traits.
//! - [`ProviderHub`]: a type-safe, string-keyed registry that modules use to
//!   expose services (payment providers, repositories) to each other.
//! - [`config`]: typed access to per-module configuration sections,
//!   including the `database` section.
//!
//! The [`migrations`] module carries the revert script used by operational
//! tooling to roll a module's schema back.

pub mod config;
pub mod context;
pub mod contracts;
pub mod migrations;
pub mod provider_hub;

pub use config::{
    load_database_config, module_config_or_default, module_config_required, ConfigError,
    ConfigProvider, DatabaseConfig, JsonConfigProvider,
};
pub use context::ModuleCtx;
pub use contracts::{DbModule, Module};
pub use migrations::revert_module_migrations;
pub use provider_hub::{ProviderHub, ProviderHubError};
