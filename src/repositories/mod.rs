// ============================================================================
// Repositories - Storage collaborators of the order workflow
// ============================================================================
//
// One trait per entity type. The workflow only ever sees these traits:
// - postgres: sqlx-backed implementations used by the binary
// - memory:   in-process fakes used by the tests
//
// ============================================================================

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::order::{NewOrder, Order, RequestedProduct};
use crate::domain::product::{Product, ProductQuantity};
use crate::error::RepositoryError;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::{PgCustomersRepository, PgOrdersRepository, PgProductsRepository};

#[async_trait]
pub trait CustomersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError>;
}

#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Fetch every stored product whose id appears in `products`.
    /// Unknown ids are skipped, so the result may be shorter than the input.
    async fn find_all_by_id(&self, products: &[RequestedProduct]) -> Result<Vec<Product>, RepositoryError>;

    /// Overwrite the stored quantity of each listed product
    async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist the order together with its lines
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError>;
}
