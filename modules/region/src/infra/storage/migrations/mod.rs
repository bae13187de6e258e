pub mod m20240624_000001_create_region_country;
pub mod m20240624_200006_add_country_audit_columns;

use sea_orm_migration::MigrationTrait;

/// All migrations of the region module, in declaration order.
#[must_use]
pub fn all() -> Vec<Box<dyn MigrationTrait>> {
    vec![
        Box::new(m20240624_000001_create_region_country::Migration),
        Box::new(m20240624_200006_add_country_audit_columns::Migration),
    ]
}
