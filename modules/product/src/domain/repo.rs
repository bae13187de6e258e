use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use commerce_db::FindConfig;
use serde::{Deserialize, Serialize};

/// A product tag as exposed to other modules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductTag {
    pub id: String,
    pub value: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

/// Filterable product tag attributes.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterableProductTagProps {
    /// Exact-match set on the primary key.
    pub id: Option<Vec<String>>,
    /// Case-insensitive substring on the tag value.
    pub value: Option<String>,
}

/// Repository contract for product tag persistence.
#[async_trait]
pub trait ProductTagRepository: Send + Sync {
    async fn find(
        &self,
        filters: FilterableProductTagProps,
        config: &FindConfig,
    ) -> anyhow::Result<Vec<ProductTag>>;

    async fn create(&self, tag: ProductTag) -> anyhow::Result<ProductTag>;
}
