// ============================================================================
// Boat Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoatError {
    #[error("One or more phone numbers are invalid")]
    InvalidPhoneNumbers,

    #[error("Boat builder is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Boat has no creation date; it never went through pre-persist")]
    MissingCreationDate,

    #[error("Boat has not been persisted yet")]
    NotPersisted,
}
