use async_trait::async_trait;
use tracing::{error, info};
use tutorly_core::{
    errors::{TutorlyError, TutorlyResult},
    models::availability::{TimeSlot, UpdateAvailabilityResponse},
    persister::AvailabilityPersister,
};

use crate::store::AvailabilityStore;

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save schedule";

/// Replaces every stored slot of `tutor_id` with `slots` in one transaction.
///
/// An empty `slots` leaves the tutor with no availability. Nothing is touched
/// when the identifier is blank.
pub async fn replace_availability<S>(
    store: &S,
    tutor_id: &str,
    slots: &[TimeSlot],
) -> TutorlyResult<()>
where
    S: AvailabilityStore + ?Sized,
{
    if tutor_id.trim().is_empty() {
        return Err(TutorlyError::MissingIdentifier);
    }

    info!(tutor_id, slots = slots.len(), "Updating schedule");

    let mut tx = store.begin().await?;
    let removed = tx.delete_all_slots(tutor_id).await?;
    let inserted = if slots.is_empty() {
        0
    } else {
        tx.insert_slots(tutor_id, slots).await?
    };
    tx.commit().await?;

    info!(tutor_id, removed, inserted, "Schedule saved");
    Ok(())
}

/// The `updateAvailability` contract: never fails, always answers pass/fail.
pub async fn update_availability<S>(
    store: &S,
    tutor_id: &str,
    slots: &[TimeSlot],
) -> UpdateAvailabilityResponse
where
    S: AvailabilityStore + ?Sized,
{
    match replace_availability(store, tutor_id, slots).await {
        Ok(()) => UpdateAvailabilityResponse::ok(),
        Err(err @ TutorlyError::MissingIdentifier) => {
            error!("Schedule update rejected: {}", err);
            UpdateAvailabilityResponse::failed(err.to_string())
        }
        Err(err) => {
            error!(tutor_id, "Schedule update failed: {:?}", err);
            UpdateAvailabilityResponse::failed(SAVE_FAILED_MESSAGE)
        }
    }
}

pub async fn find_availability<S>(store: &S, tutor_id: &str) -> TutorlyResult<Vec<TimeSlot>>
where
    S: AvailabilityStore + ?Sized,
{
    if tutor_id.trim().is_empty() {
        return Err(TutorlyError::MissingIdentifier);
    }

    Ok(store.find_slots(tutor_id).await?)
}

/// [`AvailabilityPersister`] backed by an [`AvailabilityStore`].
#[derive(Debug, Clone)]
pub struct SchedulePersister<S> {
    store: S,
}

impl<S> SchedulePersister<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S> AvailabilityPersister for SchedulePersister<S>
where
    S: AvailabilityStore,
{
    async fn update_availability(
        &self,
        tutor_id: &str,
        schedule: &[TimeSlot],
    ) -> UpdateAvailabilityResponse {
        update_availability(&self.store, tutor_id, schedule).await
    }
}
