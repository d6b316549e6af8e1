use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::persistence::core::Entity;
use crate::persistence::store::{BoatStore, StoreError};

use super::aggregate::Boat;
use super::errors::BoatError;

// ============================================================================
// Boat Repository
// ============================================================================
//
// Orchestrates: Boat → lifecycle checkpoint → Store
//
// ============================================================================

pub struct BoatRepository {
    store: Arc<dyn BoatStore>,
}

impl BoatRepository {
    pub fn new(store: Arc<dyn BoatStore>) -> Self {
        Self { store }
    }

    /// Insert a new boat or update a persisted one, returning its id
    pub async fn save(&self, boat: &mut Boat) -> Result<i32, StoreError> {
        self.save_on(boat, Local::now().date_naive()).await
    }

    /// Same as [`BoatRepository::save`] with an explicit "today" for the
    /// creation stamp.
    ///
    /// A rejected checkpoint leaves the store untouched. Changes already
    /// made to the boat in memory, the creation date included, stay.
    pub async fn save_on(&self, boat: &mut Boat, today: NaiveDate) -> Result<i32, StoreError> {
        match boat.id() {
            None => {
                boat.pre_persist(today)?;

                let id = self.store.next_id().await?;
                let mut row = boat.clone();
                row.assign_id(id);
                self.store.insert(&row).await?;

                boat.assign_id(id);
                tracing::debug!(boat_id = id, name = %boat.name(), "Boat persisted");
                Ok(id)
            }
            Some(id) => {
                boat.pre_update()?;
                self.store.update(boat).await?;

                tracing::debug!(boat_id = id, name = %boat.name(), "Boat updated");
                Ok(id)
            }
        }
    }

    pub async fn find(&self, id: i32) -> Result<Option<Boat>, StoreError> {
        self.store.find(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Boat>, StoreError> {
        self.store.find_by_name(name).await
    }

    /// Delete a persisted boat; its seats go with it. Returns the number of
    /// seats removed.
    pub async fn delete(&self, boat: &Boat) -> Result<usize, StoreError> {
        let id = boat.id().ok_or(BoatError::NotPersisted)?;
        self.store.cascade_delete(id).await
    }

    pub async fn delete_all(&self) -> Result<usize, StoreError> {
        self.store.delete_all().await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
