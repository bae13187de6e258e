//! Built-in provider that authorizes payments locally.
//!
//! Used for manual payment flows (bank transfer, cash on delivery) where no
//! upstream processor is involved.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::provider::{AuthorizeOutcome, PaymentProvider, PaymentProviderFactory};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SystemProviderConfig {
    /// Decline authorizations above this amount; unlimited when absent.
    pub max_amount: Option<Decimal>,
}

pub struct SystemProvider {
    config: SystemProviderConfig,
}

impl SystemProvider {
    #[must_use]
    pub fn new(config: SystemProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PaymentProvider for SystemProvider {
    fn id(&self) -> &str {
        SystemProviderFactory::ID
    }

    async fn authorize(
        &self,
        amount: Decimal,
        currency_code: &str,
    ) -> anyhow::Result<AuthorizeOutcome> {
        if let Some(max) = self.config.max_amount {
            if amount > max {
                return Ok(AuthorizeOutcome::Declined {
                    reason: format!("amount exceeds limit of {max} {currency_code}"),
                });
            }
        }
        Ok(AuthorizeOutcome::Authorized {
            reference: format!("sys_{amount}_{currency_code}"),
        })
    }
}

#[derive(Default)]
pub struct SystemProviderFactory;

impl SystemProviderFactory {
    pub const ID: &'static str = "system";
}

impl PaymentProviderFactory for SystemProviderFactory {
    fn provider_id(&self) -> &'static str {
        Self::ID
    }

    fn create(&self, config: &serde_json::Value) -> anyhow::Result<Arc<dyn PaymentProvider>> {
        let config: SystemProviderConfig = serde_json::from_value(config.clone())?;
        Ok(Arc::new(SystemProvider::new(config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn authorizes_below_limit() {
        let factory = SystemProviderFactory;
        let provider = factory
            .create(&json!({ "max_amount": "100" }))
            .expect("create");

        let out = provider
            .authorize(Decimal::new(50, 0), "eur")
            .await
            .expect("authorize");
        assert!(matches!(out, AuthorizeOutcome::Authorized { .. }));
    }

    #[tokio::test]
    async fn declines_above_limit() {
        let factory = SystemProviderFactory;
        let provider = factory
            .create(&json!({ "max_amount": "100" }))
            .expect("create");

        let out = provider
            .authorize(Decimal::new(500, 0), "eur")
            .await
            .expect("authorize");
        match out {
            AuthorizeOutcome::Declined { reason } => assert!(reason.contains("100")),
            other => panic!("expected decline, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_config_is_unlimited() {
        let factory = SystemProviderFactory;
        let provider = factory.create(&json!({})).expect("create");

        let out = provider
            .authorize(Decimal::new(1_000_000, 0), "usd")
            .await
            .expect("authorize");
        assert!(matches!(out, AuthorizeOutcome::Authorized { .. }));
    }

    #[test]
    fn bad_config_is_rejected() {
        let factory = SystemProviderFactory;
        assert!(factory.create(&json!({ "max_amount": [] })).is_err());
    }
}
