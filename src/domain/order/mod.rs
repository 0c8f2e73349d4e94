// ============================================================================
// Order Domain - Order Creation Workflow
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (Order, OrderLine, NewOrder)
// - Commands (CreateOrder, RequestedProduct)
// - Service (CreateOrderService, the validation-and-write workflow)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use service::*;
