use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CustomersRepository, OrdersRepository, ProductsRepository};
use crate::domain::customer::{Customer, Email};
use crate::domain::order::{NewOrder, Order, RequestedProduct};
use crate::domain::product::{Product, ProductQuantity};
use crate::error::RepositoryError;

// ============================================================================
// PostgreSQL Repositories
// ============================================================================
//
// Tables (see migrations/):
// - customers
// - products
// - orders
// - orders_products (one row per order line)
//
// Multi-row writes run in a single transaction so a failed write leaves no
// partial state behind.
//
// ============================================================================

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: Email::new(row.email),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::Inconsistent(format!("product {} has negative quantity {}", row.id, row.quantity))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price: row.price,
            quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn to_column_quantity(id: Uuid, quantity: u32) -> Result<i32, RepositoryError> {
    i32::try_from(quantity)
        .map_err(|_| RepositoryError::Inconsistent(format!("quantity {} for product {} does not fit the column", quantity, id)))
}

// ============================================================================
// Customers
// ============================================================================

pub struct PgCustomersRepository {
    pool: PgPool,
}

impl PgCustomersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomersRepository for PgCustomersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email, created_at, updated_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        tracing::debug!(customer_id = %id, found = row.is_some(), "Looked up customer");

        Ok(row.map(Customer::from))
    }
}

// ============================================================================
// Products
// ============================================================================

pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn find_all_by_id(&self, products: &[RequestedProduct]) -> Result<Vec<Product>, RepositoryError> {
        let ids: Vec<Uuid> = products.iter().map(|product| product.id).collect();

        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, quantity, created_at, updated_at FROM products WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(requested = ids.len(), found = rows.len(), "Looked up products");

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for product in products {
            let result = sqlx::query(
                "UPDATE products SET quantity = $1, updated_at = now() WHERE id = $2 AND quantity = $3",
            )
            .bind(to_column_quantity(product.id, product.quantity)?)
            .bind(product.id)
            .bind(to_column_quantity(product.id, product.expected)?)
            .execute(&mut *tx)
            .await?;

            // Dropping tx without commit rolls back the rows already updated
            if result.rows_affected() != 1 {
                tracing::warn!(product_id = %product.id, "Stock changed since it was read");
                return Err(RepositoryError::StockConflict(product.id));
            }
        }

        tx.commit().await?;

        tracing::info!(product_count = products.len(), "Updated product quantities");

        Ok(())
    }
}

// ============================================================================
// Orders
// ============================================================================

pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let order_id = Uuid::new_v4();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, created_at, updated_at) VALUES ($1, $2, $3, $3)")
            .bind(order_id)
            .bind(order.customer.id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        for line in &order.products {
            sqlx::query(
                "INSERT INTO orders_products (id, order_id, product_id, price, quantity, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $6)",
            )
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.price)
            .bind(to_column_quantity(line.product_id, line.quantity)?)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            customer_id = %order.customer.id,
            line_count = order.products.len(),
            "Persisted order"
        );

        Ok(Order {
            id: order_id,
            customer: order.customer,
            products: order.products,
            created_at: now,
            updated_at: now,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
