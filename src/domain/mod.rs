// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains the entities and the order workflow.
// Each entity has its own subdirectory with:
// - Value objects / entity types
// - Commands (order only)
// - Service (order only)
//
// Storage lives behind the traits in crate::repositories; nothing in here
// knows about SQL.
//
// ============================================================================

pub mod customer;
pub mod product;
pub mod order;
