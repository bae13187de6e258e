use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductTag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductTag::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductTag::Value).string().not_null())
                    .col(ColumnDef::new(ProductTag::Metadata).json_binary())
                    .col(
                        ColumnDef::new(ProductTag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ProductTag::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ProductTag::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_tag_value")
                    .table(ProductTag::Table)
                    .col(ProductTag::Value)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductTag {
    Table,
    Id,
    Value,
    Metadata,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
