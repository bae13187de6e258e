use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegionCountry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegionCountry::Iso2)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RegionCountry::Iso3).string().not_null())
                    .col(ColumnDef::new(RegionCountry::NumCode).string().not_null())
                    .col(ColumnDef::new(RegionCountry::Name).string().not_null())
                    .col(
                        ColumnDef::new(RegionCountry::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RegionCountry::RegionId).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegionCountry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RegionCountry {
    Table,
    #[sea_orm(iden = "iso_2")]
    Iso2,
    #[sea_orm(iden = "iso_3")]
    Iso3,
    NumCode,
    Name,
    DisplayName,
    RegionId,
}
