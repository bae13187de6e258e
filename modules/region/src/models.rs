//! Declarative model definitions for the region module.
//!
//! These descriptors document the module's data shape and relationship
//! rules; the storage layer under `infra` owns the actual entities and
//! migrations.

use commerce_dml::{
    belongs_to, has_many, json, text, Cascades, DmlEntity, DmlError, DmlSchema, EntityConfig,
};

/// The `Country` model: child of `Region`, keyed by its ISO 3166-1 alpha-2
/// code.
///
/// # Errors
/// Never fails for this fixed definition; the `Result` is part of the
/// descriptor-building contract.
pub fn country() -> Result<DmlEntity, DmlError> {
    DmlEntity::new(
        EntityConfig {
            name: Some("Country".to_owned()),
            table_name: Some("region_country".to_owned()),
        },
        DmlSchema::from_iter([
            ("iso_2".to_owned(), text().primary_key().into()),
            ("iso_3".to_owned(), text().into()),
            ("num_code".to_owned(), text().into()),
            ("name".to_owned(), text().into()),
            ("display_name".to_owned(), text().into()),
            (
                "region".to_owned(),
                belongs_to("Region").mapped_by("countries").nullable().into(),
            ),
            ("metadata".to_owned(), json().nullable().into()),
        ]),
    )
}

/// The `Region` model. Deleting a region cascades to its countries.
///
/// # Errors
/// Never fails for this fixed definition; the `Result` is part of the
/// descriptor-building contract.
pub fn region() -> Result<DmlEntity, DmlError> {
    DmlEntity::new(
        EntityConfig {
            name: Some("Region".to_owned()),
            table_name: Some("region".to_owned()),
        },
        DmlSchema::from_iter([
            ("id".to_owned(), text().primary_key().into()),
            ("name".to_owned(), text().into()),
            ("currency_code".to_owned(), text().into()),
            (
                "countries".to_owned(),
                has_many("Country").mapped_by("region").into(),
            ),
            ("metadata".to_owned(), json().nullable().into()),
        ]),
    )?
    .cascades(Cascades::delete(["countries"]))
}

/// All DML models exposed by this module.
///
/// # Errors
/// Propagates descriptor-building failures.
pub fn dml_models() -> Result<Vec<DmlEntity>, DmlError> {
    Ok(vec![country()?, region()?])
}
