pub mod m20240710_093012_create_product_tag;

use sea_orm_migration::MigrationTrait;

/// All migrations of the product module, in declaration order.
#[must_use]
pub fn all() -> Vec<Box<dyn MigrationTrait>> {
    vec![Box::new(m20240710_093012_create_product_tag::Migration)]
}
