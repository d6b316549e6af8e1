use async_trait::async_trait;

use crate::domain::boat::{Boat, BoatError, OwnerKey, SeatKey};

// ============================================================================
// Boat Store - Persistence Collaborator Contract
// ============================================================================
//
// Unlike persistence/core, this contract is Boat-specific: it speaks in
// boats, seats and owners.
//
// Responsibilities delegated to the store:
// 1. Hand out integer identities on first save
// 2. Enforce the uniqueness of boat ids and names
// 3. Keep every stored seat under a single boat
// 4. Refuse rows that fail the boat's checkpoints (unstamped creation
//    date, invalid seat phone numbers)
// 5. Cascade a boat delete to its seat rows and owner links
//
// BoatRepository is the usual entry point; it runs the checkpoints before
// calling the store, which re-checks them at the boundary.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] BoatError),

    #[error("A boat named '{0}' already exists")]
    DuplicateName(String),

    #[error("A boat with id {0} already exists")]
    DuplicateId(i32),

    #[error("Seat {seat} already belongs to boat {boat}")]
    SeatOwnedElsewhere { seat: SeatKey, boat: i32 },

    #[error("Boat not found: {0}")]
    NotFound(i32),
}

#[async_trait]
pub trait BoatStore: Send + Sync {
    /// Next unused identity
    async fn next_id(&self) -> Result<i32, StoreError>;

    /// Insert a boat that already carries its identity and creation date
    async fn insert(&self, boat: &Boat) -> Result<(), StoreError>;

    /// Replace the stored row of a persisted boat, seats and owner links included
    async fn update(&self, boat: &Boat) -> Result<(), StoreError>;

    async fn find(&self, id: i32) -> Result<Option<Boat>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Boat>, StoreError>;

    /// Delete a boat together with its seats; owner links and the harbour
    /// reference go with the row. Returns the number of seats removed.
    async fn cascade_delete(&self, id: i32) -> Result<usize, StoreError>;

    /// Delete every boat. Returns the number of boats removed.
    async fn delete_all(&self) -> Result<usize, StoreError>;

    /// Boat owning the stored seat, if any
    async fn seat_owner(&self, seat: SeatKey) -> Result<Option<i32>, StoreError>;

    /// Boats linked to an owner in the stored association
    async fn boats_of_owner(&self, owner: OwnerKey) -> Result<Vec<i32>, StoreError>;
}
