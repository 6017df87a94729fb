pub mod catalog;
pub mod comparison;
pub mod config;
pub mod domain;
pub mod errors;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, ProductStore};
pub use comparison::{ComparisonEngine, ComparisonResult, ComparisonSummary};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::product::{NewProduct, Product, ProductFields, ProductId};
pub use errors::{CatalogError, InterfaceError, StorageError, ValidationError};
pub use validation::validate_new_product;
