//! Declarative model definitions for the product module.

use commerce_dml::{json, text, DmlEntity, DmlError, DmlSchema, EntityConfig};

/// The `ProductTag` model: a free-form label attached to products.
///
/// # Errors
/// Never fails for this fixed definition; the `Result` is part of the
/// descriptor-building contract.
pub fn product_tag() -> Result<DmlEntity, DmlError> {
    DmlEntity::new(
        EntityConfig {
            name: Some("ProductTag".to_owned()),
            table_name: Some("product_tag".to_owned()),
        },
        DmlSchema::from_iter([
            ("id".to_owned(), text().primary_key().into()),
            ("value".to_owned(), text().into()),
            ("metadata".to_owned(), json().nullable().into()),
        ]),
    )
}

/// All DML models exposed by this module.
///
/// # Errors
/// Propagates descriptor-building failures.
pub fn dml_models() -> Result<Vec<DmlEntity>, DmlError> {
    Ok(vec![product_tag()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_tag_descriptor_shape() {
        let tag = product_tag().unwrap();
        assert_eq!(tag.name(), "ProductTag");
        assert_eq!(tag.table_name(), "product_tag");

        let parsed = tag.parse();
        assert!(parsed.schema.contains_key("value"));
        assert!(parsed.cascades.delete.is_empty());
    }
}
