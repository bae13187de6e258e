//! Schema building blocks for DML entities.
//!
//! A schema maps field names to [`SchemaField`]s, which are either scalar
//! [`Property`]s or [`Relation`]s to other entities. Insertion order is
//! preserved so that generated artifacts stay deterministic.

use indexmap::IndexMap;

/// Ordered field-name → definition mapping of an entity.
pub type DmlSchema = IndexMap<String, SchemaField>;

/// Scalar column kinds supported by the descriptor layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Text,
    Number,
    Boolean,
    Json,
    DateTime,
}

/// A scalar property definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    kind: PropertyKind,
    nullable: bool,
    primary_key: bool,
}

impl Property {
    fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            nullable: false,
            primary_key: false,
        }
    }

    /// Mark the property as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the property as (part of) the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

/// A text property.
#[must_use]
pub fn text() -> Property {
    Property::new(PropertyKind::Text)
}

/// A numeric property.
#[must_use]
pub fn number() -> Property {
    Property::new(PropertyKind::Number)
}

/// A boolean property.
#[must_use]
pub fn boolean() -> Property {
    Property::new(PropertyKind::Boolean)
}

/// A JSON property.
#[must_use]
pub fn json() -> Property {
    Property::new(PropertyKind::Json)
}

/// A timestamp property.
#[must_use]
pub fn date_time() -> Property {
    Property::new(PropertyKind::DateTime)
}

/// Relationship direction between two entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    /// Child points to parent; the foreign key lives on this entity.
    BelongsTo,
    /// Parent owns exactly one child.
    HasOne,
    /// Parent owns many children.
    HasMany,
}

/// A relation definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    kind: RelationKind,
    target: String,
    mapped_by: Option<String>,
    nullable: bool,
}

impl Relation {
    fn new(kind: RelationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            mapped_by: None,
            nullable: false,
        }
    }

    /// Name of the inverse field on the target entity.
    #[must_use]
    pub fn mapped_by(mut self, field: impl Into<String>) -> Self {
        self.mapped_by = Some(field.into());
        self
    }

    /// Mark the relation as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn mapped_by_field(&self) -> Option<&str> {
        self.mapped_by.as_deref()
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// A child-to-parent relation (foreign key on this entity).
#[must_use]
pub fn belongs_to(target: impl Into<String>) -> Relation {
    Relation::new(RelationKind::BelongsTo, target)
}

/// A parent-to-single-child relation.
#[must_use]
pub fn has_one(target: impl Into<String>) -> Relation {
    Relation::new(RelationKind::HasOne, target)
}

/// A parent-to-children relation.
#[must_use]
pub fn has_many(target: impl Into<String>) -> Relation {
    Relation::new(RelationKind::HasMany, target)
}

/// A named schema entry: scalar property or relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaField {
    Property(Property),
    Relation(Relation),
}

impl SchemaField {
    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            SchemaField::Property(p) => Some(p),
            SchemaField::Relation(_) => None,
        }
    }

    #[must_use]
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            SchemaField::Relation(r) => Some(r),
            SchemaField::Property(_) => None,
        }
    }

    /// True for child-to-parent relations, the kind that may not cascade
    /// deletes from the parent side.
    #[must_use]
    pub fn is_belongs_to(&self) -> bool {
        matches!(
            self,
            SchemaField::Relation(r) if r.kind() == RelationKind::BelongsTo
        )
    }
}

impl From<Property> for SchemaField {
    fn from(p: Property) -> Self {
        SchemaField::Property(p)
    }
}

impl From<Relation> for SchemaField {
    fn from(r: Relation) -> Self {
        SchemaField::Relation(r)
    }
}
