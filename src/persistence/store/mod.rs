// ============================================================================
// Persistence Store - Collaborator Contract and In-Memory Implementation
// ============================================================================

pub mod boat_store;
pub mod in_memory;

pub use boat_store::{BoatStore, StoreError};
pub use in_memory::InMemoryBoatStore;
