use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer::Customer;

// ============================================================================
// Order Value Objects
// ============================================================================

/// One product's quantity and snapshot price within an order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: u32,
    /// Price at the time the order was placed
    pub price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer: Customer,
    pub products: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn total(&self) -> Decimal {
        self.products.iter().map(OrderLine::subtotal).sum()
    }
}

/// Input handed to OrdersRepository::create
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub customer: Customer,
    pub products: Vec<OrderLine>,
}

// ============================================================================
// Unit Tests
// ============================================================================
