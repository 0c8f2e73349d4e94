use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CustomersRepository, OrdersRepository, ProductsRepository};
use crate::domain::customer::Customer;
use crate::domain::order::{NewOrder, Order, RequestedProduct};
use crate::domain::product::{Product, ProductQuantity};
use crate::error::RepositoryError;

// ============================================================================
// In-Memory Repositories (test fakes)
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomersRepository {
    customers: RwLock<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomersRepository {
    pub async fn insert(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id, customer);
    }
}

#[async_trait]
impl CustomersRepository for InMemoryCustomersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.customers.read().await.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryProductsRepository {
    products: RwLock<HashMap<Uuid, Product>>,
    update_calls: AtomicUsize,
}

impl InMemoryProductsRepository {
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }

    pub async fn get(&self, id: Uuid) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    pub async fn set_quantity(&self, id: Uuid, quantity: u32) {
        if let Some(product) = self.products.write().await.get_mut(&id) {
            product.quantity = quantity;
        }
    }

    pub async fn set_price(&self, id: Uuid, price: Decimal) {
        if let Some(product) = self.products.write().await.get_mut(&id) {
            product.price = price;
        }
    }

    /// Number of update_quantity calls seen so far
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProductsRepository {
    async fn find_all_by_id(&self, products: &[RequestedProduct]) -> Result<Vec<Product>, RepositoryError> {
        let stored = self.products.read().await;
        Ok(products
            .iter()
            .filter_map(|requested| stored.get(&requested.id).cloned())
            .collect())
    }

    async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<(), RepositoryError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut stored = self.products.write().await;

        // All or nothing, like the database transaction
        for update in products {
            match stored.get(&update.id) {
                Some(product) if product.quantity == update.expected => {}
                Some(_) => return Err(RepositoryError::StockConflict(update.id)),
                None => {
                    return Err(RepositoryError::Inconsistent(format!("product {} is not stored", update.id)))
                }
            }
        }

        for update in products {
            if let Some(product) = stored.get_mut(&update.id) {
                product.quantity = update.quantity;
                product.updated_at = Utc::now();
            }
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrdersRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrdersRepository {
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            customer: order.customer,
            products: order.products,
            created_at: now,
            updated_at: now,
        };

        self.orders.write().await.push(order.clone());
        Ok(order)
    }
}
