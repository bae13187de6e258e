pub mod repo;

pub use repo::{Country, CountryFilters, CountryRepository};
