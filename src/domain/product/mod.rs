// ============================================================================
// Product Domain
// ============================================================================
//
// Products carry the live price and stock level. The order workflow reads
// both and writes back the reduced quantity.
//
// ============================================================================

pub mod value_objects;

// Re-export for convenience
pub use value_objects::*;
