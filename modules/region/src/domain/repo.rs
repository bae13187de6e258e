use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use commerce_db::FindConfig;
use serde::{Deserialize, Serialize};

/// A country as exposed to other modules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub iso_2: String,
    pub iso_3: String,
    pub num_code: String,
    pub name: String,
    pub display_name: String,
    pub region_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

/// Filterable country attributes.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CountryFilters {
    /// Exact-match set on the primary key.
    pub iso_2: Option<Vec<String>>,
    /// Countries assigned to the given region.
    pub region_id: Option<String>,
    /// Case-insensitive substring on the display name.
    pub q: Option<String>,
}

/// Repository contract for country persistence.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn get(&self, iso_2: &str) -> anyhow::Result<Option<Country>>;

    async fn list(
        &self,
        filters: CountryFilters,
        config: &FindConfig,
    ) -> anyhow::Result<Vec<Country>>;

    async fn create(&self, country: Country) -> anyhow::Result<Country>;
}
