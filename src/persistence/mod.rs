// ============================================================================
// Persistence Infrastructure
// ============================================================================
//
// core/  - generic entity lifecycle contract, no domain types
// store/ - the Boat store collaborator that owns identities, uniqueness
//          and cascading deletes; it depends on src/domain/boat
//
// ============================================================================

pub mod core;
pub mod store;

pub use self::core::*;
pub use store::*;
