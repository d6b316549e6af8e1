use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::domain::boat::{Boat, BoatError, OwnerKey, SeatKey};
use crate::persistence::core::Entity;
use super::boat_store::{BoatStore, StoreError};

// ============================================================================
// In-Memory Boat Store
// ============================================================================
//
// Keeps the same "tables" a relational mapping would produce:
// - boats:      id -> boat row
// - names:      unique index on boat name
// - seats:      seat -> owning boat id
// - boat_owner: join rows of the many-to-many owner association
//
// ============================================================================

#[derive(Default)]
struct Tables {
    boats: HashMap<i32, Boat>,
    names: HashMap<String, i32>,
    seats: HashMap<SeatKey, i32>,
    boat_owner: HashSet<(i32, OwnerKey)>,
}

impl Tables {
    fn write_relations(&mut self, id: i32, boat: &Boat) {
        self.drop_relations(id);
        for seat in boat.seats() {
            self.seats.insert(seat.key(), id);
        }
        for owner in boat.owners() {
            self.boat_owner.insert((id, *owner));
        }
    }

    /// First seat of `boat` already stored under another boat, with that boat's id
    fn seat_claimed_elsewhere(&self, id: i32, boat: &Boat) -> Option<(SeatKey, i32)> {
        boat.seats().iter().find_map(|seat| match self.seats.get(&seat.key()) {
            Some(owner) if *owner != id => Some((seat.key(), *owner)),
            _ => None,
        })
    }

    fn check_seats(&self, id: i32, boat: &Boat) -> Result<(), StoreError> {
        match self.seat_claimed_elsewhere(id, boat) {
            Some((seat, owner)) => Err(StoreError::SeatOwnedElsewhere { seat, boat: owner }),
            None => Ok(()),
        }
    }

    fn drop_relations(&mut self, id: i32) -> usize {
        let before = self.seats.len();
        self.seats.retain(|_, boat_id| *boat_id != id);
        self.boat_owner.retain(|(boat_id, _)| *boat_id != id);
        before - self.seats.len()
    }
}

pub struct InMemoryBoatStore {
    next: AtomicI32,
    tables: RwLock<Tables>,
}

impl InMemoryBoatStore {
    pub fn new() -> Self {
        Self::with_first_id(1)
    }

    /// Continue an existing identity sequence at `first_id`
    pub fn with_first_id(first_id: i32) -> Self {
        Self {
            next: AtomicI32::new(first_id),
            tables: RwLock::new(Tables::default()),
        }
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.boats.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryBoatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoatStore for InMemoryBoatStore {
    async fn next_id(&self) -> Result<i32, StoreError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }

    async fn insert(&self, boat: &Boat) -> Result<(), StoreError> {
        let id = boat.id().ok_or(BoatError::NotPersisted)?;
        if boat.creation_date().is_none() {
            return Err(BoatError::MissingCreationDate.into());
        }
        if !boat.has_valid_phone_numbers() {
            return Err(BoatError::InvalidPhoneNumbers.into());
        }

        let mut tables = self.tables.write().await;

        if tables.boats.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        if tables.names.contains_key(boat.name()) {
            return Err(StoreError::DuplicateName(boat.name().to_string()));
        }
        tables.check_seats(id, boat)?;

        tables.names.insert(boat.name().to_string(), id);
        tables.write_relations(id, boat);
        tables.boats.insert(id, boat.clone());

        tracing::info!(boat_id = id, name = %boat.name(), seats = boat.seats().len(), "Inserted boat");
        Ok(())
    }

    async fn update(&self, boat: &Boat) -> Result<(), StoreError> {
        let id = boat.id().ok_or(BoatError::NotPersisted)?;
        boat.pre_update()?;

        let mut tables = self.tables.write().await;

        let old_name = match tables.boats.get(&id) {
            Some(stored) => stored.name().to_string(),
            None => return Err(StoreError::NotFound(id)),
        };

        if old_name != boat.name() && tables.names.contains_key(boat.name()) {
            return Err(StoreError::DuplicateName(boat.name().to_string()));
        }
        tables.check_seats(id, boat)?;

        if old_name != boat.name() {
            tables.names.remove(&old_name);
            tables.names.insert(boat.name().to_string(), id);
        }

        tables.write_relations(id, boat);
        tables.boats.insert(id, boat.clone());

        tracing::info!(boat_id = id, name = %boat.name(), "Updated boat");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Option<Boat>, StoreError> {
        Ok(self.tables.read().await.boats.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Boat>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .names
            .get(name)
            .and_then(|id| tables.boats.get(id))
            .cloned())
    }

    async fn cascade_delete(&self, id: i32) -> Result<usize, StoreError> {
        let mut tables = self.tables.write().await;

        let boat = tables.boats.remove(&id).ok_or(StoreError::NotFound(id))?;
        tables.names.remove(boat.name());
        let seats_removed = tables.drop_relations(id);

        tracing::info!(boat_id = id, seats_removed, "Deleted boat");
        Ok(seats_removed)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut tables = self.tables.write().await;
        let removed = tables.boats.len();
        *tables = Tables::default();

        tracing::info!(removed, "Deleted all boats");
        Ok(removed)
    }

    async fn seat_owner(&self, seat: SeatKey) -> Result<Option<i32>, StoreError> {
        Ok(self.tables.read().await.seats.get(&seat).copied())
    }

    async fn boats_of_owner(&self, owner: OwnerKey) -> Result<Vec<i32>, StoreError> {
        let tables = self.tables.read().await;
        let mut ids: Vec<i32> = tables
            .boat_owner
            .iter()
            .filter(|(_, o)| *o == owner)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::boat::{Owner, PhoneNumber, Seat};
    use chrono::NaiveDate;

    fn persisted_boat(id: i32, name: &str) -> Boat {
        let mut boat = Boat::new(
            "Beneteau",
            "First 24",
            name,
            NaiveDate::from_ymd_opt(2022, 4, 9).unwrap(),
        );
        boat.pre_persist(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()).unwrap();
        boat.assign_id(id);
        boat
    }

    #[tokio::test]
    async fn test_insert_requires_creation_date() {
        let store = InMemoryBoatStore::new();
        let mut boat = Boat::new("A", "B", "C", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        boat.assign_id(1);

        let result = store.insert(&boat).await;
        assert!(matches!(result, Err(StoreError::Validation(BoatError::MissingCreationDate))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_phone() {
        let store = InMemoryBoatStore::new();
        let mut boat = persisted_boat(1, "Havfrue");
        boat.add_seat(Seat::new(Some(PhoneNumber::new("12"))));

        let result = store.insert(&boat).await;
        assert!(matches!(result, Err(StoreError::Validation(BoatError::InvalidPhoneNumbers))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_phone() {
        let store = InMemoryBoatStore::new();
        let mut boat = persisted_boat(1, "Havfrue");
        let seat = Seat::new(Some(PhoneNumber::new("12345678")));
        let seat_key = seat.key();
        boat.add_seat(seat);
        store.insert(&boat).await.unwrap();

        boat.seat_mut(seat_key)
            .unwrap()
            .set_number(Some(PhoneNumber::new("12")));
        let result = store.update(&boat).await;
        assert!(matches!(result, Err(StoreError::Validation(BoatError::InvalidPhoneNumbers))));

        let stored = store.find(1).await.unwrap().unwrap();
        assert_eq!(stored.seats()[0].number().unwrap().as_str(), "12345678");
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = InMemoryBoatStore::new();
        store.insert(&persisted_boat(1, "Havfrue")).await.unwrap();

        let result = store.insert(&persisted_boat(1, "Nordlys")).await;
        assert!(matches!(result, Err(StoreError::DuplicateId(1))));

        assert_eq!(store.find_by_name("Havfrue").await.unwrap().unwrap().name(), "Havfrue");
        assert!(store.find_by_name("Nordlys").await.unwrap().is_none());
        store.insert(&persisted_boat(2, "Nordlys")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_seat_belongs_to_one_stored_boat() {
        let store = InMemoryBoatStore::new();
        let seat = Seat::new(None);
        let seat_key = seat.key();

        let mut first = persisted_boat(1, "Havfrue");
        first.add_seat(seat.clone());
        store.insert(&first).await.unwrap();

        let mut second = persisted_boat(2, "Nordlys");
        second.add_seat(seat.clone());
        let result = store.insert(&second).await;
        assert!(matches!(
            result,
            Err(StoreError::SeatOwnedElsewhere { seat, boat: 1 }) if seat == seat_key
        ));
        assert!(store.find(2).await.unwrap().is_none());

        let mut third = persisted_boat(3, "Solskin");
        store.insert(&third).await.unwrap();
        third.add_seat(seat);
        assert!(matches!(
            store.update(&third).await,
            Err(StoreError::SeatOwnedElsewhere { boat: 1, .. })
        ));

        assert_eq!(store.seat_owner(seat_key).await.unwrap(), Some(1));
        assert_eq!(store.cascade_delete(1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = InMemoryBoatStore::with_first_id(10);
        assert_eq!(store.next_id().await.unwrap(), 10);
        assert_eq!(store.next_id().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_insert_requires_id() {
        let store = InMemoryBoatStore::new();
        let boat = Boat::new("A", "B", "C", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());

        let result = store.insert(&boat).await;
        assert!(matches!(result, Err(StoreError::Validation(BoatError::NotPersisted))));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = InMemoryBoatStore::new();
        store.insert(&persisted_boat(1, "Havfrue")).await.unwrap();

        let result = store.insert(&persisted_boat(2, "Havfrue")).await;
        assert!(matches!(result, Err(StoreError::DuplicateName(name)) if name == "Havfrue"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_rename_keeps_index_unique() {
        let store = InMemoryBoatStore::new();
        store.insert(&persisted_boat(1, "Havfrue")).await.unwrap();
        store.insert(&persisted_boat(2, "Nordlys")).await.unwrap();

        let mut renamed = store.find(2).await.unwrap().unwrap();
        renamed.set_name("Havfrue");
        assert!(matches!(store.update(&renamed).await, Err(StoreError::DuplicateName(_))));

        renamed.set_name("Solskin");
        store.update(&renamed).await.unwrap();
        assert!(store.find_by_name("Nordlys").await.unwrap().is_none());
        assert_eq!(store.find_by_name("Solskin").await.unwrap().unwrap().id(), Some(2));
    }

    #[tokio::test]
    async fn test_update_unknown_boat() {
        let store = InMemoryBoatStore::new();
        let result = store.update(&persisted_boat(5, "Ghost")).await;
        assert!(matches!(result, Err(StoreError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_seats_and_links() {
        let store = InMemoryBoatStore::new();
        let mut boat = persisted_boat(1, "Havfrue");
        let seat = Seat::new(Some(PhoneNumber::new("12345678")));
        let seat_key = seat.key();
        boat.add_seat(seat);
        boat.add_seat(Seat::new(None));
        let mut owner = Owner::new("Ida Hansen");
        boat.add_owner(&mut owner);

        store.insert(&boat).await.unwrap();
        assert_eq!(store.seat_owner(seat_key).await.unwrap(), Some(1));
        assert_eq!(store.boats_of_owner(owner.key()).await.unwrap(), vec![1]);

        let seats_removed = store.cascade_delete(1).await.unwrap();
        assert_eq!(seats_removed, 2);
        assert_eq!(store.seat_owner(seat_key).await.unwrap(), None);
        assert!(store.boats_of_owner(owner.key()).await.unwrap().is_empty());
        assert!(store.find_by_name("Havfrue").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_drops_orphaned_seats() {
        let store = InMemoryBoatStore::new();
        let mut boat = persisted_boat(1, "Havfrue");
        let seat = Seat::new(None);
        let seat_key = seat.key();
        boat.add_seat(seat);
        store.insert(&boat).await.unwrap();

        boat.remove_seat(seat_key);
        store.update(&boat).await.unwrap();
        assert_eq!(store.seat_owner(seat_key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let store = InMemoryBoatStore::new();
        store.insert(&persisted_boat(1, "Havfrue")).await.unwrap();
        store.insert(&persisted_boat(2, "Nordlys")).await.unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.is_empty().await);
        assert!(matches!(store.cascade_delete(1).await, Err(StoreError::NotFound(1))));
    }
}
