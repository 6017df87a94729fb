use thiserror::Error;

use crate::domain::product::ProductId;

pub const MIN_COMPARISON_PRODUCTS: usize = 2;
pub const MAX_COMPARISON_PRODUCTS: usize = 5;

/// Caller input that is malformed or outside policy. Never retried.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error(
        "too few products to compare: got {requested}, at least {min} are required",
        min = MIN_COMPARISON_PRODUCTS
    )]
    TooFewProducts { requested: usize },
    #[error(
        "too many products to compare: got {requested}, at most {max} are allowed",
        max = MAX_COMPARISON_PRODUCTS
    )]
    TooManyProducts { requested: usize },
    #[error("product id is required")]
    EmptyProductId,
    #[error("product name is required")]
    MissingName,
    #[error("product brand is required")]
    MissingBrand,
    #[error("product price is required and must be greater than 0")]
    InvalidPrice,
    #[error("product category is required")]
    MissingCategory,
    #[error("product rating must be between 0 and 5 (got {0})")]
    RatingOutOfRange(f64),
}

/// The storage collaborator could not complete a read or write.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("malformed stored record: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("products not found: {}", join_ids(missing))]
    NotFound { missing: Vec<ProductId> },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, missing: Vec<ProductId>, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "One or more requested products do not exist.",
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl CatalogError {
    pub fn not_found(missing: Vec<ProductId>) -> Self {
        Self::NotFound { missing }
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<CatalogError> for InterfaceError {
    fn from(value: CatalogError) -> Self {
        let correlation_id = "unassigned".to_owned();
        match value {
            CatalogError::Validation(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id }
            }
            CatalogError::NotFound { missing } => {
                let message = format!("products not found: {}", join_ids(&missing));
                Self::NotFound { message, missing, correlation_id }
            }
            CatalogError::Storage(error @ StorageError::Unavailable(_)) => {
                Self::ServiceUnavailable { message: error.to_string(), correlation_id }
            }
            CatalogError::Storage(error @ StorageError::Malformed(_)) => {
                Self::Internal { message: error.to_string(), correlation_id }
            }
        }
    }
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter().map(ProductId::as_str).collect::<Vec<_>>().join(", ")
}
