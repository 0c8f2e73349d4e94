// ============================================================================
// Customer Domain
// ============================================================================
//
// Customers are only looked up by the order workflow, never mutated.
//
// ============================================================================

pub mod value_objects;

// Re-export for convenience
pub use value_objects::*;
