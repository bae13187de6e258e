use std::sync::Arc;

use commerce_db::FindConfig;
use tracing::instrument;

use super::repo::{FilterableProductTagProps, ProductTag, ProductTagRepository};

/// Query service over product tags.
///
/// A thin pass-through: filters, sort and pagination go to the repository
/// untouched. Kept as a separate layer so callers depend on the service,
/// not on the storage contract.
pub struct ProductTagService {
    repo: Arc<dyn ProductTagRepository>,
}

impl ProductTagService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProductTagRepository>) -> Self {
        Self { repo }
    }

    /// List tags matching the filters, honouring sort and pagination.
    ///
    /// # Errors
    /// Propagates repository failures.
    #[instrument(skip(self, filters, config), fields(skip = config.skip, take = config.take))]
    pub async fn list(
        &self,
        filters: FilterableProductTagProps,
        config: &FindConfig,
    ) -> anyhow::Result<Vec<ProductTag>> {
        self.repo.find(filters, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use commerce_db::SortDir;
    use parking_lot::Mutex;

    struct RecordingRepo {
        seen: Mutex<Option<(FilterableProductTagProps, FindConfig)>>,
        result: Vec<ProductTag>,
    }

    #[async_trait]
    impl ProductTagRepository for RecordingRepo {
        async fn find(
            &self,
            filters: FilterableProductTagProps,
            config: &FindConfig,
        ) -> anyhow::Result<Vec<ProductTag>> {
            *self.seen.lock() = Some((filters, config.clone()));
            Ok(self.result.clone())
        }

        async fn create(&self, tag: ProductTag) -> anyhow::Result<ProductTag> {
            Ok(tag)
        }
    }

    fn tag(id: &str, value: &str) -> ProductTag {
        let now = Utc::now().fixed_offset();
        ProductTag {
            id: id.to_owned(),
            value: value.to_owned(),
            metadata: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn list_forwards_filters_and_config_unchanged() {
        let repo = Arc::new(RecordingRepo {
            seen: Mutex::new(None),
            result: vec![tag("ptag_1", "winter")],
        });
        let service = ProductTagService::new(repo.clone());

        let filters = FilterableProductTagProps {
            id: Some(vec!["ptag_1".to_owned()]),
            value: Some("win".to_owned()),
        };
        let config = FindConfig::new()
            .order_by("value", SortDir::Desc)
            .skip(4)
            .take(2);

        let out = service.list(filters, &config).await.expect("list");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, "winter");

        let (seen_filters, seen_config) = repo.seen.lock().take().expect("repo called");
        assert_eq!(seen_filters.id, Some(vec!["ptag_1".to_owned()]));
        assert_eq!(seen_filters.value, Some("win".to_owned()));
        assert_eq!(seen_config.skip, Some(4));
        assert_eq!(seen_config.take, Some(2));
        assert_eq!(seen_config.order.len(), 1);
        assert_eq!(seen_config.order[0].field, "value");
    }

    #[tokio::test]
    async fn list_propagates_repository_errors() {
        struct FailingRepo;

        #[async_trait]
        impl ProductTagRepository for FailingRepo {
            async fn find(
                &self,
                _filters: FilterableProductTagProps,
                _config: &FindConfig,
            ) -> anyhow::Result<Vec<ProductTag>> {
                anyhow::bail!("storage offline")
            }

            async fn create(&self, tag: ProductTag) -> anyhow::Result<ProductTag> {
                Ok(tag)
            }
        }

        let service = ProductTagService::new(Arc::new(FailingRepo));
        let err = service
            .list(FilterableProductTagProps::default(), &FindConfig::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("storage offline"));
    }
}
