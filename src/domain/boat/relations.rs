use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::value_objects::{BoatKey, HarbourKey, OwnerKey, PhoneNumber, SeatKey};

// ============================================================================
// Related Entities - Seat (composition), Owner and Harbour (shared)
// ============================================================================

/// Anything holding the inverse side of a boat association.
///
/// The boat inserts into and removes from this collection when links are
/// made or broken, so both sides change in the same call.
pub trait BoatCollection {
    fn boats(&self) -> &HashSet<BoatKey>;
    fn boats_mut(&mut self) -> &mut HashSet<BoatKey>;

    fn holds(&self, boat: BoatKey) -> bool {
        self.boats().contains(&boat)
    }
}

/// A seat belongs to exactly one boat at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    key: SeatKey,
    number: Option<PhoneNumber>,
    boat: Option<BoatKey>,
}

impl Seat {
    pub fn new(number: Option<PhoneNumber>) -> Self {
        Self {
            key: SeatKey::new(),
            number,
            boat: None,
        }
    }

    pub fn key(&self) -> SeatKey {
        self.key
    }

    pub fn number(&self) -> Option<&PhoneNumber> {
        self.number.as_ref()
    }

    pub fn set_number(&mut self, number: Option<PhoneNumber>) {
        self.number = number;
    }

    /// Owning boat, if attached
    pub fn boat(&self) -> Option<BoatKey> {
        self.boat
    }

    pub fn set_boat(&mut self, boat: Option<BoatKey>) {
        self.boat = boat;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    key: OwnerKey,
    pub name: String,
    boats: HashSet<BoatKey>,
}

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: OwnerKey::new(),
            name: name.into(),
            boats: HashSet::new(),
        }
    }

    pub fn key(&self) -> OwnerKey {
        self.key
    }
}

impl BoatCollection for Owner {
    fn boats(&self) -> &HashSet<BoatKey> {
        &self.boats
    }

    fn boats_mut(&mut self) -> &mut HashSet<BoatKey> {
        &mut self.boats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harbour {
    key: HarbourKey,
    pub name: String,
    boats: HashSet<BoatKey>,
}

impl Harbour {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: HarbourKey::new(),
            name: name.into(),
            boats: HashSet::new(),
        }
    }

    pub fn key(&self) -> HarbourKey {
        self.key
    }
}

impl BoatCollection for Harbour {
    fn boats(&self) -> &HashSet<BoatKey> {
        &self.boats
    }

    fn boats_mut(&mut self) -> &mut HashSet<BoatKey> {
        &mut self.boats
    }
}
