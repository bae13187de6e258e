use std::sync::Arc;

use async_trait::async_trait;
use commerce_db::{Db, FindConfig, SortDir};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::domain::{FilterableProductTagProps, ProductTag, ProductTagRepository};

use super::entity::{self, Column, Entity as TagEntity};

pub struct SeaOrmProductTagRepository {
    db: Arc<Db>,
}

impl SeaOrmProductTagRepository {
    #[must_use]
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

fn order_column(field: &str) -> anyhow::Result<Column> {
    match field {
        "id" => Ok(Column::Id),
        "value" => Ok(Column::Value),
        "created_at" => Ok(Column::CreatedAt),
        "updated_at" => Ok(Column::UpdatedAt),
        other => anyhow::bail!("unknown order field for product tags: {other}"),
    }
}

fn to_order(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

#[async_trait]
impl ProductTagRepository for SeaOrmProductTagRepository {
    async fn find(
        &self,
        filters: FilterableProductTagProps,
        config: &FindConfig,
    ) -> anyhow::Result<Vec<ProductTag>> {
        let mut cond = Condition::all();

        if let Some(ids) = filters.id {
            cond = cond.add(Column::Id.is_in(ids));
        }
        if let Some(value) = filters.value {
            // LOWER + LIKE keeps the match case-insensitive on every backend.
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(Column::Value)))
                    .like(format!("%{}%", value.to_lowercase())),
            );
        }
        if !config.with_deleted {
            cond = cond.add(Column::DeletedAt.is_null());
        }

        let mut query = TagEntity::find().filter(cond);
        for key in &config.order {
            query = query.order_by(order_column(&key.field)?, to_order(key.dir));
        }
        if let Some(skip) = config.skip {
            query = query.offset(skip);
        }
        if let Some(take) = config.take {
            query = query.limit(take);
        }

        let rows = query.all(self.db.sea()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, tag: ProductTag) -> anyhow::Result<ProductTag> {
        let model = entity::ActiveModel {
            id: ActiveValue::Set(tag.id),
            value: ActiveValue::Set(tag.value),
            metadata: ActiveValue::Set(tag.metadata),
            created_at: ActiveValue::Set(tag.created_at),
            updated_at: ActiveValue::Set(tag.updated_at),
            deleted_at: ActiveValue::Set(tag.deleted_at),
        };

        let inserted = model.insert(self.db.sea()).await?;
        Ok(inserted.into())
    }
}
