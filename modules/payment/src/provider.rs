use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Result of an authorization attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// Funds reserved; carries the provider-side reference.
    Authorized { reference: String },
    /// The provider declined the payment.
    Declined { reason: String },
}

/// A configured payment provider instance.
///
/// One instance exists per `(provider, config entry)` pair; the same
/// provider implementation can be registered several times with different
/// configuration (for example one Stripe account per sales channel).
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Provider identifier, e.g. `"system"` or `"stripe"`.
    fn id(&self) -> &str;

    /// Reserve the given amount with the upstream processor.
    async fn authorize(&self, amount: Decimal, currency_code: &str)
        -> anyhow::Result<AuthorizeOutcome>;
}

/// Builds [`PaymentProvider`] instances from raw per-entry configuration.
pub trait PaymentProviderFactory: Send + Sync {
    /// Identifier matched against configured provider entries; also the
    /// `<PROVIDER>` part of the registration key.
    fn provider_id(&self) -> &'static str;

    /// Construct an instance for one config entry.
    ///
    /// # Errors
    /// Returns an error when the configuration value is invalid for this
    /// provider.
    fn create(&self, config: &serde_json::Value) -> anyhow::Result<Arc<dyn PaymentProvider>>;
}
