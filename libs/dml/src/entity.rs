//! DML entity descriptor.
//!
//! A [`DmlEntity`] ties together a derived short name, a literal table name,
//! a schema, and cascade rules. It is constructed once at model-definition
//! time and is immutable afterwards; cascades are attached through a
//! consuming builder call that validates them against the schema.

use crate::error::DmlError;
use crate::schema::{DmlSchema, SchemaField};

/// Object-style entity configuration.
///
/// The table name is mandatory; the short name falls back to the table name
/// when absent.
#[derive(Clone, Debug, Default)]
pub struct EntityConfig {
    pub name: Option<String>,
    pub table_name: Option<String>,
}

/// Entity naming input: a plain `"schema.table"` string or an
/// [`EntityConfig`] object.
#[derive(Clone, Debug)]
pub enum NameOrConfig {
    Table(String),
    Config(EntityConfig),
}

impl From<&str> for NameOrConfig {
    fn from(value: &str) -> Self {
        NameOrConfig::Table(value.to_owned())
    }
}

impl From<String> for NameOrConfig {
    fn from(value: String) -> Self {
        NameOrConfig::Table(value)
    }
}

impl From<EntityConfig> for NameOrConfig {
    fn from(value: EntityConfig) -> Self {
        NameOrConfig::Config(value)
    }
}

/// Camel-case a separated identifier, preserving the case of the first
/// character: `region_country` → `regionCountry`, `Country` → `Country`.
fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for c in input.chars() {
        match c {
            '-' | '_' | ' ' => upper_next = true,
            _ if upper_next => {
                out.extend(c.to_uppercase());
                upper_next = false;
            }
            _ => out.push(c),
        }
    }
    out
}

/// Strip a leading `schema.` qualifier and keep the remainder as the short
/// name source. A name without a dot is used as-is.
fn short_name(qualified: &str) -> &str {
    match qualified.split_once('.') {
        Some((_schema, rest)) if !rest.is_empty() => rest,
        _ => qualified,
    }
}

fn extract_name_and_table_name(config: &NameOrConfig) -> Result<(String, String), DmlError> {
    match config {
        NameOrConfig::Table(value) => {
            Ok((to_camel_case(short_name(value)), value.clone()))
        }
        NameOrConfig::Config(cfg) => {
            let table_name = cfg.table_name.clone().ok_or_else(|| {
                DmlError::MissingTableName {
                    name: cfg.name.clone().unwrap_or_default(),
                }
            })?;
            let potential = cfg.name.as_deref().unwrap_or(&table_name);
            Ok((to_camel_case(short_name(potential)), table_name))
        }
    }
}

/// Delete actions propagated to related records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cascades {
    pub delete: Vec<String>,
}

impl Cascades {
    /// Cascade deletes to the given relations.
    #[must_use]
    pub fn delete<I, S>(relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delete: relations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Borrowed view of an entity's underlying information.
#[derive(Clone, Copy, Debug)]
pub struct ParsedEntity<'a> {
    pub name: &'a str,
    pub table_name: &'a str,
    pub schema: &'a DmlSchema,
    pub cascades: &'a Cascades,
}

/// Representation of a DML model with a unique name, its schema and
/// relationships.
#[derive(Clone, Debug)]
pub struct DmlEntity {
    name: String,
    table_name: String,
    schema: DmlSchema,
    cascades: Cascades,
}

impl DmlEntity {
    /// Build an entity descriptor from a naming config and a schema.
    ///
    /// # Errors
    /// Returns [`DmlError::MissingTableName`] when an object-style config
    /// omits the table name.
    pub fn new(config: impl Into<NameOrConfig>, schema: DmlSchema) -> Result<Self, DmlError> {
        let (name, table_name) = extract_name_and_table_name(&config.into())?;
        Ok(Self {
            name,
            table_name,
            schema,
            cascades: Cascades::default(),
        })
    }

    /// Attach cascade rules, validating them against the schema.
    ///
    /// Deleting an entity may cascade to relations it owns (`has_one`,
    /// `has_many`). Cascading a delete through a `belongs_to` relation would
    /// delete the parent from the child side and is rejected.
    ///
    /// # Errors
    /// Returns [`DmlError::UnknownCascadeRelation`] for names that are not
    /// relations in the schema and [`DmlError::ChildToParentCascade`] when
    /// any listed relation is a `belongs_to`.
    pub fn cascades(mut self, cascades: Cascades) -> Result<Self, DmlError> {
        for relation in &cascades.delete {
            if !self.schema.contains_key(relation) {
                return Err(DmlError::UnknownCascadeRelation {
                    entity: self.name.clone(),
                    relation: relation.clone(),
                });
            }
        }

        let child_to_parent: Vec<&str> = cascades
            .delete
            .iter()
            .filter(|relation| {
                self.schema
                    .get(relation.as_str())
                    .is_some_and(SchemaField::is_belongs_to)
            })
            .map(String::as_str)
            .collect();

        if !child_to_parent.is_empty() {
            return Err(DmlError::ChildToParentCascade {
                entity: self.name.clone(),
                relations: child_to_parent.join(", "),
            });
        }

        self.cascades = cascades;
        Ok(self)
    }

    /// Derived camel-cased short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Literal table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub fn schema(&self) -> &DmlSchema {
        &self.schema
    }

    /// Parse the entity to get its underlying information.
    #[must_use]
    pub fn parse(&self) -> ParsedEntity<'_> {
        ParsedEntity {
            name: &self.name,
            table_name: &self.table_name,
            schema: &self.schema,
            cascades: &self.cascades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{belongs_to, has_many, json, text};

    fn country_schema() -> DmlSchema {
        DmlSchema::from_iter([
            ("iso_2".to_owned(), text().primary_key().into()),
            ("name".to_owned(), text().into()),
            (
                "region".to_owned(),
                belongs_to("Region").mapped_by("countries").nullable().into(),
            ),
            ("metadata".to_owned(), json().nullable().into()),
        ])
    }

    #[test]
    fn string_config_derives_name_and_keeps_literal_table_name() {
        let entity = DmlEntity::new("public.orders", DmlSchema::new()).unwrap();
        assert_eq!(entity.name(), "orders");
        assert_eq!(entity.table_name(), "public.orders");
    }

    #[test]
    fn string_config_without_schema_qualifier() {
        let entity = DmlEntity::new("region_country", DmlSchema::new()).unwrap();
        assert_eq!(entity.name(), "regionCountry");
        assert_eq!(entity.table_name(), "region_country");
    }

    #[test]
    fn dotted_remainder_is_joined_back() {
        // Only the first segment is treated as a schema qualifier.
        let entity = DmlEntity::new("public.orders.archive", DmlSchema::new()).unwrap();
        assert_eq!(entity.name(), "orders.archive");
        assert_eq!(entity.table_name(), "public.orders.archive");
    }

    #[test]
    fn object_config_uses_explicit_name() {
        let entity = DmlEntity::new(
            EntityConfig {
                name: Some("Country".to_owned()),
                table_name: Some("region_country".to_owned()),
            },
            country_schema(),
        )
        .unwrap();
        assert_eq!(entity.name(), "Country");
        assert_eq!(entity.table_name(), "region_country");
    }

    #[test]
    fn object_config_falls_back_to_table_name() {
        let entity = DmlEntity::new(
            EntityConfig {
                name: None,
                table_name: Some("product_tag".to_owned()),
            },
            DmlSchema::new(),
        )
        .unwrap();
        assert_eq!(entity.name(), "productTag");
    }

    #[test]
    fn object_config_without_table_name_fails() {
        let err = DmlEntity::new(
            EntityConfig {
                name: Some("Country".to_owned()),
                table_name: None,
            },
            DmlSchema::new(),
        )
        .unwrap_err();

        match err {
            DmlError::MissingTableName { name } => assert_eq!(name, "Country"),
            other => panic!("expected MissingTableName, got: {other:?}"),
        }
    }

    #[test]
    fn cascade_delete_on_belongs_to_is_rejected() {
        let err = DmlEntity::new(
            EntityConfig {
                name: Some("Country".to_owned()),
                table_name: Some("region_country".to_owned()),
            },
            country_schema(),
        )
        .unwrap()
        .cascades(Cascades::delete(["region"]))
        .unwrap_err();

        match err {
            DmlError::ChildToParentCascade { entity, relations } => {
                assert_eq!(entity, "Country");
                assert_eq!(relations, "region");
            }
            other => panic!("expected ChildToParentCascade, got: {other:?}"),
        }
    }

    #[test]
    fn cascade_error_lists_all_offending_relations() {
        let schema = DmlSchema::from_iter([
            ("region".to_owned(), belongs_to("Region").into()),
            ("zone".to_owned(), belongs_to("Zone").into()),
            ("children".to_owned(), has_many("Child").into()),
        ]);

        let err = DmlEntity::new("node", schema)
            .unwrap()
            .cascades(Cascades::delete(["region", "children", "zone"]))
            .unwrap_err();

        match err {
            DmlError::ChildToParentCascade { relations, .. } => {
                assert_eq!(relations, "region, zone");
            }
            other => panic!("expected ChildToParentCascade, got: {other:?}"),
        }
    }

    #[test]
    fn cascade_delete_on_has_many_succeeds_and_round_trips() {
        let schema = DmlSchema::from_iter([
            ("id".to_owned(), text().primary_key().into()),
            (
                "countries".to_owned(),
                has_many("Country").mapped_by("region").into(),
            ),
        ]);

        let entity = DmlEntity::new(
            EntityConfig {
                name: Some("Region".to_owned()),
                table_name: Some("region".to_owned()),
            },
            schema,
        )
        .unwrap()
        .cascades(Cascades::delete(["countries"]))
        .unwrap();

        let parsed = entity.parse();
        assert_eq!(parsed.name, "Region");
        assert_eq!(parsed.table_name, "region");
        assert_eq!(parsed.cascades.delete, vec!["countries".to_owned()]);
    }

    #[test]
    fn cascade_on_unknown_relation_is_rejected() {
        let err = DmlEntity::new("region", DmlSchema::new())
            .unwrap()
            .cascades(Cascades::delete(["countries"]))
            .unwrap_err();

        match err {
            DmlError::UnknownCascadeRelation { relation, .. } => {
                assert_eq!(relation, "countries");
            }
            other => panic!("expected UnknownCascadeRelation, got: {other:?}"),
        }
    }

    #[test]
    fn camel_case_preserves_leading_capital() {
        let entity = DmlEntity::new(
            EntityConfig {
                name: Some("Product_Tag".to_owned()),
                table_name: Some("product_tag".to_owned()),
            },
            DmlSchema::new(),
        )
        .unwrap();
        assert_eq!(entity.name(), "ProductTag");
    }
}
