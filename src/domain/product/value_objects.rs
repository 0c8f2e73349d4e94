use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Product Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Units currently in stock
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[allow(dead_code)]
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stock left after taking `requested` units, or None if there is not enough
    pub fn remaining_after(&self, requested: u32) -> Option<u32> {
        self.quantity.checked_sub(requested)
    }
}

/// New stored quantity for one product.
///
/// The write only applies while the stored quantity still equals `expected`,
/// the value the order was validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: Uuid,
    pub quantity: u32,
    pub expected: u32,
}

impl ProductQuantity {
    /// The write that undoes this one
    pub fn reverted(&self) -> Self {
        Self {
            id: self.id,
            quantity: self.expected,
            expected: self.quantity,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
