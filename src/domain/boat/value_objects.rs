use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Boat Value Objects
// ============================================================================
//
// Handles give every entity in the boat graph a stable identity from the
// moment it is constructed, long before the store assigns an integer id.
// Back-references and inverse collections hold handles, never the entity.
//
// ============================================================================

macro_rules! entity_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_key!(
    /// In-memory handle of a boat
    BoatKey
);
entity_key!(
    /// In-memory handle of a seat
    SeatKey
);
entity_key!(
    /// In-memory handle of an owner
    OwnerKey
);
entity_key!(
    /// In-memory handle of a harbour
    HarbourKey
);

/// Contact phone number attached to a seat
///
/// Construction never validates; the boat checks every seat number at its
/// lifecycle checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(pub String);

impl PhoneNumber {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
