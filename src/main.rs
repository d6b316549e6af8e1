use chrono::NaiveDate;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use boat_registry::domain::boat::{Boat, BoatRepository, Harbour, Owner, PhoneNumber, Seat};
use boat_registry::persistence::store::{BoatStore, InMemoryBoatStore, StoreError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,boat_registry=debug")),
        )
        .init();

    tracing::info!("Starting boat registry demo");

    let store = Arc::new(InMemoryBoatStore::new());
    let repository = BoatRepository::new(store.clone());

    // === 1. Build a boat and attach its relations ===
    let registration_date = NaiveDate::from_ymd_opt(2021, 5, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid registration date"))?;
    let mut boat = Boat::builder()
        .brand("Beneteau")
        .model("Oceanis 46.1")
        .name("Sea Breeze")
        .registration_date(registration_date)
        .build()?;

    let mut owner = Owner::new("Ida Hansen");
    let mut harbour = Harbour::new("Nyhavn");

    let seat = Seat::new(Some(PhoneNumber::new("12345678")));
    let seat_key = seat.key();
    boat.add_seat(seat);
    boat.add_seat(Seat::new(None));
    boat.add_owner(&mut owner);
    boat.set_harbour(&mut harbour);

    // === 2. First save: id and creation date are assigned ===
    let id = repository.save(&mut boat).await?;
    tracing::info!(boat_id = id, "Saved {}", boat);
    tracing::debug!("Stored row: {}", serde_json::to_string(&boat)?);

    // === 3. An invalid seat number blocks the update ===
    if let Some(seat) = boat.seat_mut(seat_key) {
        seat.set_number(Some(PhoneNumber::new("12")));
    }
    match repository.save(&mut boat).await {
        Err(StoreError::Validation(e)) => tracing::warn!("Update rejected: {}", e),
        other => anyhow::bail!("expected a validation failure, got {:?}", other),
    }

    // Fix it and update
    if let Some(seat) = boat.seat_mut(seat_key) {
        seat.set_number(Some(PhoneNumber::new("87654321")));
    }
    repository.save(&mut boat).await?;

    // === 4. A second boat cannot reuse the name ===
    let mut twin = Boat::new("Bavaria", "C42", "Sea Breeze", registration_date);
    if let Err(e) = repository.save(&mut twin).await {
        tracing::warn!("Second boat rejected: {}", e);
    }

    // === 5. Delete: seats go with the boat, owner and harbour stay ===
    boat.remove_owner(&mut owner);
    boat.remove_harbour(&mut harbour);
    let seats_removed = repository.delete(&boat).await?;
    tracing::info!(
        boat_id = id,
        seats_removed,
        owner_boats = store.boats_of_owner(owner.key()).await?.len(),
        "Deleted boat"
    );

    tracing::info!("Demo complete");
    Ok(())
}
