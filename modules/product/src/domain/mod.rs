pub mod repo;
pub mod service;

pub use repo::{FilterableProductTagProps, ProductTag, ProductTagRepository};
pub use service::ProductTagService;
