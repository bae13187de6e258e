//! Product module: product tags.

pub mod models;
pub mod module;

pub use module::ProductModule;

pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use domain::{
    FilterableProductTagProps, ProductTag, ProductTagRepository, ProductTagService,
};
