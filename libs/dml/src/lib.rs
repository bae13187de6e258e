//! Declarative DML entity descriptors.
//!
//! Modules describe their data models with [`DmlEntity`]: a unique name, a
//! literal table name, an ordered schema of properties and relations, and an
//! optional set of cascade rules. The descriptors are configuration-time
//! records; the ORM layer (sea-orm entities and migrations) stays the source
//! of truth for the actual storage shape.
//!
//! ```
//! use commerce_dml::{belongs_to, json, text, DmlEntity, DmlSchema};
//!
//! let country = DmlEntity::new(
//!     "public.region_country",
//!     DmlSchema::from_iter([
//!         ("iso_2".to_owned(), text().primary_key().into()),
//!         ("name".to_owned(), text().into()),
//!         ("region".to_owned(), belongs_to("Region").nullable().into()),
//!         ("metadata".to_owned(), json().nullable().into()),
//!     ]),
//! )
//! .unwrap();
//!
//! assert_eq!(country.name(), "regionCountry");
//! assert_eq!(country.table_name(), "public.region_country");
//! ```

pub mod entity;
pub mod error;
pub mod schema;

pub use entity::{Cascades, DmlEntity, EntityConfig, NameOrConfig, ParsedEntity};
pub use error::DmlError;
pub use schema::{
    belongs_to, boolean, date_time, has_many, has_one, json, number, text, DmlSchema, Property,
    PropertyKind, Relation, RelationKind, SchemaField,
};
