// ============================================================================
// Boat Domain - Aggregate Root with Seats, Owners and Harbour
// ============================================================================
//
// This module contains ALL Boat-specific code:
// - Value objects (entity handles, PhoneNumber)
// - Related entities (Seat, Owner, Harbour) and the BoatCollection contract
// - Validation (seat phone number rule)
// - Errors (BoatError enum)
// - Aggregate (Boat with relationship bookkeeping and lifecycle checkpoints)
// - Repository (BoatRepository driving the store)
//
// ============================================================================

pub mod value_objects;
pub mod relations;
pub mod validation;
pub mod errors;
pub mod aggregate;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use relations::*;
pub use validation::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
