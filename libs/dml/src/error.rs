use thiserror::Error;

/// Errors raised while building a DML entity descriptor.
///
/// All of these are configuration mistakes: they fail fast at model-definition
/// time and are never retried.
#[derive(Debug, Error)]
pub enum DmlError {
    /// Object-style configuration without a table name.
    #[error("missing \"table_name\" property in the config object for \"{name}\" entity")]
    MissingTableName { name: String },

    /// Cascade delete configured on a child-to-parent (belongs-to) relation.
    #[error(
        "cannot cascade delete \"{relations}\" relationship(s) from \"{entity}\" entity, \
         child to parent cascades are not allowed"
    )]
    ChildToParentCascade { entity: String, relations: String },

    /// Cascade rule referencing a field that is not a relation in the schema.
    #[error("unknown relation \"{relation}\" in cascade rules of \"{entity}\" entity")]
    UnknownCascadeRelation { entity: String, relation: String },
}
