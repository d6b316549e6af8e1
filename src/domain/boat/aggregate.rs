use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::persistence::core::Entity;
use super::errors::BoatError;
use super::relations::{BoatCollection, Harbour, Owner, Seat};
use super::validation::validate_all;
use super::value_objects::{BoatKey, HarbourKey, OwnerKey, SeatKey};

// ============================================================================
// Boat Aggregate - Entity State & Relationship Bookkeeping
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    // Identity
    key: BoatKey,
    id: Option<i32>,

    // Attributes
    brand: String,
    model: String,
    name: String,
    registration_date: NaiveDate,

    // Relationships
    seats: Vec<Seat>,
    owners: HashSet<OwnerKey>,
    harbour: Option<HarbourKey>,

    // Audit Trail
    creation_date: Option<NaiveDate>,
}

impl Boat {
    /// Unattached boat; nothing is validated until it is persisted
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        name: impl Into<String>,
        registration_date: NaiveDate,
    ) -> Self {
        Self {
            key: BoatKey::new(),
            id: None,
            brand: brand.into(),
            model: model.into(),
            name: name.into(),
            registration_date,
            seats: Vec::new(),
            owners: HashSet::new(),
            harbour: None,
            creation_date: None,
        }
    }

    pub fn builder() -> BoatBuilder {
        BoatBuilder::default()
    }

    pub fn key(&self) -> BoatKey {
        self.key
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) {
        self.brand = brand.into();
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn registration_date(&self) -> NaiveDate {
        self.registration_date
    }

    pub fn set_registration_date(&mut self, registration_date: NaiveDate) {
        self.registration_date = registration_date;
    }

    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.creation_date
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_mut(&mut self, seat: SeatKey) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.key() == seat)
    }

    pub fn owners(&self) -> &HashSet<OwnerKey> {
        &self.owners
    }

    pub fn harbour(&self) -> Option<HarbourKey> {
        self.harbour
    }

    // ------------------------------------------------------------------------
    // Seats (composition)
    // ------------------------------------------------------------------------

    /// Take ownership of a seat and point its back-reference at this boat.
    ///
    /// A seat whose key is already on board is ignored.
    pub fn add_seat(&mut self, mut seat: Seat) {
        if self.seats.iter().any(|s| s.key() == seat.key()) {
            return;
        }
        seat.set_boat(Some(self.key));
        tracing::debug!(boat = %self.key, seat = %seat.key(), "Seat added");
        self.seats.push(seat);
    }

    /// Detach a seat and hand it back with its back-reference cleared.
    pub fn remove_seat(&mut self, seat: SeatKey) -> Option<Seat> {
        let index = self.seats.iter().position(|s| s.key() == seat)?;
        let mut removed = self.seats.remove(index);
        removed.set_boat(None);
        tracing::debug!(boat = %self.key, seat = %seat, "Seat removed");
        Some(removed)
    }

    // ------------------------------------------------------------------------
    // Owners (shared, many-to-many)
    // ------------------------------------------------------------------------

    pub fn add_owner(&mut self, owner: &mut Owner) {
        self.owners.insert(owner.key());
        owner.boats_mut().insert(self.key);
        tracing::debug!(boat = %self.key, owner = %owner.key(), "Owner linked");
    }

    pub fn remove_owner(&mut self, owner: &mut Owner) {
        self.owners.remove(&owner.key());
        owner.boats_mut().remove(&self.key);
        tracing::debug!(boat = %self.key, owner = %owner.key(), "Owner unlinked");
    }

    // ------------------------------------------------------------------------
    // Harbour (shared, many-to-one)
    // ------------------------------------------------------------------------

    /// Moor at `harbour`. A previous harbour keeps this boat in its
    /// collection until `remove_harbour` is called on it.
    pub fn set_harbour(&mut self, harbour: &mut Harbour) {
        self.harbour = Some(harbour.key());
        harbour.boats_mut().insert(self.key);
        tracing::debug!(boat = %self.key, harbour = %harbour.key(), "Harbour set");
    }

    /// Clear the harbour reference and leave `harbour`'s collection.
    ///
    /// `harbour` must be the one currently assigned; passing another one
    /// clears the reference here but leaves the real harbour untouched.
    pub fn remove_harbour(&mut self, harbour: &mut Harbour) {
        if self.harbour != Some(harbour.key()) {
            tracing::warn!(
                boat = %self.key,
                assigned = ?self.harbour,
                given = %harbour.key(),
                "Removing a harbour that is not the assigned one"
            );
        }
        self.harbour = None;
        harbour.boats_mut().remove(&self.key);
    }

    // ------------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------------

    /// Whole years from today to the creation date; see [`Boat::age_on`].
    pub fn age(&self) -> Option<i32> {
        self.age_on(Local::now().date_naive())
    }

    /// Whole years in the period running from `today` to the creation date.
    ///
    /// The period starts at `today`, so any past creation date yields zero
    /// or a negative number. `None` before the boat is first persisted.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.creation_date
            .map(|created| whole_years_between(today, created))
    }

    pub fn has_valid_phone_numbers(&self) -> bool {
        validate_all(&self.seats)
    }
}

/// Signed whole years from `start` to `end`, truncated toward zero.
fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut months = (end.year() * 12 + end.month0() as i32)
        - (start.year() * 12 + start.month0() as i32);
    let days = end.day() as i32 - start.day() as i32;

    if months > 0 && days < 0 {
        months -= 1;
    } else if months < 0 && days > 0 {
        months += 1;
    }

    months / 12
}

// ============================================================================
// Entity Trait Implementation - Lifecycle Checkpoints
// ============================================================================

impl Entity for Boat {
    type Id = i32;
    type Error = BoatError;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn assign_id(&mut self, id: i32) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    fn pre_persist(&mut self, today: NaiveDate) -> Result<(), BoatError> {
        if self.creation_date.is_none() {
            self.creation_date = Some(today);
        }

        if !self.has_valid_phone_numbers() {
            tracing::warn!(boat = %self.key, name = %self.name, "Rejected insert: invalid seat phone number");
            return Err(BoatError::InvalidPhoneNumbers);
        }

        tracing::debug!(boat = %self.key, creation_date = ?self.creation_date, "Boat passed pre-persist checks");
        Ok(())
    }

    fn pre_update(&self) -> Result<(), BoatError> {
        if self.id.is_none() {
            return Err(BoatError::NotPersisted);
        }

        if !self.has_valid_phone_numbers() {
            tracing::warn!(boat_id = ?self.id, name = %self.name, "Rejected update: invalid seat phone number");
            return Err(BoatError::InvalidPhoneNumbers);
        }

        Ok(())
    }
}

// ============================================================================
// Equality, Hashing, Display
// ============================================================================

impl PartialEq for Boat {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.brand == other.brand
            && self.model == other.model
            && self.name == other.name
            && self.registration_date == other.registration_date
            && self.creation_date == other.creation_date
    }
}

impl Eq for Boat {}

impl Hash for Boat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.model.hash(state);
        self.brand.hash(state);
        self.creation_date.hash(state);
    }
}

impl fmt::Display for Boat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map_or_else(|| "null".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "Boat{{id={}, brand='{}', model='{}', name='{}', harbour={}, creationDate={}}}",
            opt(&self.id),
            self.brand,
            self.model,
            self.name,
            opt(&self.harbour),
            opt(&self.creation_date),
        )
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct BoatBuilder {
    brand: Option<String>,
    model: Option<String>,
    name: Option<String>,
    registration_date: Option<NaiveDate>,
}

impl BoatBuilder {
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn registration_date(mut self, registration_date: NaiveDate) -> Self {
        self.registration_date = Some(registration_date);
        self
    }

    pub fn build(self) -> Result<Boat, BoatError> {
        Ok(Boat::new(
            self.brand.ok_or(BoatError::MissingField("brand"))?,
            self.model.ok_or(BoatError::MissingField("model"))?,
            self.name.ok_or(BoatError::MissingField("name"))?,
            self.registration_date
                .ok_or(BoatError::MissingField("registration_date"))?,
        ))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
