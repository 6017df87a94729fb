use thiserror::Error;

use catalog_core::errors::StorageError;

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for StorageError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Database(source) => StorageError::Unavailable(source.to_string()),
            RepositoryError::Decode(message) => StorageError::Malformed(message),
        }
    }
}
