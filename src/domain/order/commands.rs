use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedProduct {
    pub id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    pub customer_id: Uuid,
    pub products: Vec<RequestedProduct>,
}

impl CreateOrder {
    /// Check the request shape and merge repeated product ids.
    ///
    /// The result holds one entry per distinct id, in order of first
    /// appearance, with the quantities of repeated entries summed.
    pub fn normalized_products(&self) -> Result<Vec<RequestedProduct>, AppError> {
        if self.products.is_empty() {
            return Err(AppError::Validation("Order must contain at least one product".to_string()));
        }

        let mut merged: Vec<RequestedProduct> = Vec::with_capacity(self.products.len());

        for requested in &self.products {
            if requested.quantity == 0 {
                return Err(AppError::Validation(format!(
                    "Quantity for product {} must be greater than zero",
                    requested.id
                )));
            }

            match merged.iter_mut().find(|entry| entry.id == requested.id) {
                Some(entry) => {
                    entry.quantity = entry.quantity.checked_add(requested.quantity).ok_or_else(|| {
                        AppError::Validation(format!("Quantity for product {} is too large", requested.id))
                    })?;
                }
                None => merged.push(*requested),
            }
        }

        Ok(merged)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_from_json() {
        let customer_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let json = format!(
            r#"{{"customer_id":"{}","products":[{{"id":"{}","quantity":3}}]}}"#,
            customer_id, product_id
        );

        let command: CreateOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(command.customer_id, customer_id);
        assert_eq!(command.products, vec![RequestedProduct { id: product_id, quantity: 3 }]);
    }

    #[test]
    fn test_repeated_ids_are_merged_in_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let command = CreateOrder {
            customer_id: Uuid::new_v4(),
            products: vec![
                RequestedProduct { id: first, quantity: 2 },
                RequestedProduct { id: second, quantity: 1 },
                RequestedProduct { id: first, quantity: 4 },
            ],
        };

        let merged = command.normalized_products().unwrap();
        assert_eq!(
            merged,
            vec![
                RequestedProduct { id: first, quantity: 6 },
                RequestedProduct { id: second, quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_request_rejected() {
        let command = CreateOrder {
            customer_id: Uuid::new_v4(),
            products: vec![],
        };

        assert!(matches!(command.normalized_products(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let command = CreateOrder {
            customer_id: Uuid::new_v4(),
            products: vec![RequestedProduct { id: Uuid::new_v4(), quantity: 0 }],
        };

        assert!(matches!(command.normalized_products(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_quantity_overflow_rejected() {
        let id = Uuid::new_v4();
        let command = CreateOrder {
            customer_id: Uuid::new_v4(),
            products: vec![
                RequestedProduct { id, quantity: u32::MAX },
                RequestedProduct { id, quantity: 1 },
            ],
        };

        assert!(matches!(command.normalized_products(), Err(AppError::Validation(_))));
    }
}
