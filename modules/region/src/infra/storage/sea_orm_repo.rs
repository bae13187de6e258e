use std::sync::Arc;

use async_trait::async_trait;
use commerce_db::{Db, FindConfig, SortDir};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::domain::{Country, CountryFilters, CountryRepository};

use super::entity::{self, Column, Entity as CountryEntity};

pub struct SeaOrmCountryRepository {
    db: Arc<Db>,
}

impl SeaOrmCountryRepository {
    #[must_use]
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

fn order_column(field: &str) -> anyhow::Result<Column> {
    match field {
        "iso_2" => Ok(Column::Iso2),
        "name" => Ok(Column::Name),
        "display_name" => Ok(Column::DisplayName),
        "created_at" => Ok(Column::CreatedAt),
        "updated_at" => Ok(Column::UpdatedAt),
        other => anyhow::bail!("unknown order field for countries: {other}"),
    }
}

fn to_order(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

#[async_trait]
impl CountryRepository for SeaOrmCountryRepository {
    async fn get(&self, iso_2: &str) -> anyhow::Result<Option<Country>> {
        let found = CountryEntity::find_by_id(iso_2)
            .filter(Column::DeletedAt.is_null())
            .one(self.db.sea())
            .await?;
        Ok(found.map(Into::into))
    }

    async fn list(
        &self,
        filters: CountryFilters,
        config: &FindConfig,
    ) -> anyhow::Result<Vec<Country>> {
        let mut cond = Condition::all();

        if let Some(iso_2) = filters.iso_2 {
            cond = cond.add(Column::Iso2.is_in(iso_2));
        }
        if let Some(region_id) = filters.region_id {
            cond = cond.add(Column::RegionId.eq(region_id));
        }
        if let Some(q) = filters.q {
            // LOWER + LIKE keeps the match case-insensitive on every backend.
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(Column::DisplayName)))
                    .like(format!("%{}%", q.to_lowercase())),
            );
        }
        if !config.with_deleted {
            cond = cond.add(Column::DeletedAt.is_null());
        }

        let mut query = CountryEntity::find().filter(cond);
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

    async fn create(&self, country: Country) -> anyhow::Result<Country> {
        let model = entity::ActiveModel {
            iso_2: ActiveValue::Set(country.iso_2),
            iso_3: ActiveValue::Set(country.iso_3),
            num_code: ActiveValue::Set(country.num_code),
            name: ActiveValue::Set(country.name),
            display_name: ActiveValue::Set(country.display_name),
            region_id: ActiveValue::Set(country.region_id),
            metadata: ActiveValue::Set(country.metadata),
            created_at: ActiveValue::Set(country.created_at),
            updated_at: ActiveValue::Set(country.updated_at),
            deleted_at: ActiveValue::Set(country.deleted_at),
        };

        let inserted = model.insert(self.db.sea()).await?;
        Ok(inserted.into())
    }
}
