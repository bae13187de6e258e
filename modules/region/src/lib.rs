//! Region module: regions and their countries.

pub mod models;
pub mod module;

pub use module::RegionModule;

pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use domain::{Country, CountryFilters, CountryRepository};
