use std::fmt;
use uuid::Uuid;

// ============================================================================
// Application Errors
// ============================================================================
//
// Every failure of the order workflow surfaces as an AppError. Domain
// failures carry a user-facing message and are never retried; repository
// failures wrap whatever the storage layer reported.
//
// ============================================================================

/// Entity kinds that a lookup can fail to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Customer,
    Product,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Customer => write!(f, "Customer"),
            Entity::Product => write!(f, "Product"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Product exceeded limit: {product_id} requested {requested}, {available} available")]
    InsufficientStock {
        product_id: Uuid,
        requested: u32,
        available: u32,
    },

    #[error("Invalid order request: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AppError {
    /// Short message suitable for returning to the caller
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(entity) => format!("{} not found", entity),
            AppError::InsufficientStock { .. } => "Product exceeded limit".to_string(),
            AppError::Validation(reason) => reason.clone(),
            AppError::Repository(_) => "Internal server error".to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Repository(_) => 500,
            _ => 400,
        }
    }

    /// Label used for the failure counter
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::NotFound(Entity::Customer) => "customer_not_found",
            AppError::NotFound(Entity::Product) => "product_not_found",
            AppError::InsufficientStock { .. } => "insufficient_stock",
            AppError::Validation(_) => "validation",
            AppError::Repository(_) => "repository",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Stock of product {0} changed while the order was being placed")]
    StockConflict(Uuid),

    #[error("Inconsistent stored data: {0}")]
    Inconsistent(String),
}

pub type AppResult<T> = Result<T, AppError>;
