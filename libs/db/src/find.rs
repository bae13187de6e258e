//! Generic list options shared by module repositories.
//!
//! [`FindConfig`] carries pagination and ordering from services down to the
//! storage layer without committing to a concrete entity. Soft-deletion is a
//! convention of the commerce schema (`deleted_at` column); repositories
//! exclude trashed rows unless `with_deleted` is set.

use serde::{Deserialize, Serialize};

/// Sort direction for an order key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

/// A single order key: field name plus direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub dir: SortDir,
}

/// Pagination, ordering and soft-deletion options for list queries.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FindConfig {
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub order: Vec<OrderBy>,
    pub with_deleted: bool,
}

impl FindConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.order.push(OrderBy {
            field: field.into(),
            dir,
        });
        self
    }

    /// Include soft-deleted rows in the result.
    #[must_use]
    pub fn with_deleted(mut self) -> Self {
        self.with_deleted = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_options() {
        let cfg = FindConfig::new()
            .skip(20)
            .take(10)
            .order_by("value", SortDir::Asc)
            .order_by("created_at", SortDir::Desc);

        assert_eq!(cfg.skip, Some(20));
        assert_eq!(cfg.take, Some(10));
        assert_eq!(cfg.order.len(), 2);
        assert_eq!(cfg.order[1].dir, SortDir::Desc);
        assert!(!cfg.with_deleted);
    }

    #[test]
    fn deserializes_from_json_with_defaults() {
        let cfg: FindConfig =
            serde_json::from_str(r#"{"take": 15, "order": [{"field": "value", "dir": "asc"}]}"#)
                .unwrap();
        assert_eq!(cfg.take, Some(15));
        assert_eq!(cfg.skip, None);
        assert_eq!(cfg.order[0].field, "value");
    }
}
