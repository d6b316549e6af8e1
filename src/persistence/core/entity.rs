use chrono::NaiveDate;

// ============================================================================
// Entity Lifecycle Contract - Persistence Core
// ============================================================================
//
// Key Principles:
// 1. Identity is assigned by the store on first save and never changes
// 2. The entity validates itself at two checkpoints: before the first
//    insert and before every update
// 3. A failed checkpoint aborts the write; nothing reaches the store
//
// This trait is GENERIC; any persistable aggregate root implements it.
//
// ============================================================================

/// Generic persistable entity
///
/// Type Parameters:
/// - `Id`: The store-assigned identity
/// - `Error`: The error type for checkpoint violations
pub trait Entity: Sized + Send + Sync {
    type Id: Copy + Eq + std::fmt::Debug + Send + Sync;
    type Error;

    /// Store-assigned identity, `None` until first save
    fn id(&self) -> Option<Self::Id>;

    /// Record the identity handed out by the store.
    ///
    /// Has no effect when an identity is already present.
    fn assign_id(&mut self, id: Self::Id);

    /// Runs once, right before the first insert
    fn pre_persist(&mut self, today: NaiveDate) -> Result<(), Self::Error>;

    /// Runs before every update of an already persisted entity
    fn pre_update(&self) -> Result<(), Self::Error>;

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
