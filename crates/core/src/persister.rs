use async_trait::async_trait;

use crate::models::availability::{TimeSlot, UpdateAvailabilityResponse};

/// Server-side half of a schedule save.
///
/// Implementations replace everything stored for `tutor_id` with `schedule`
/// as one unit and never report partial success.
#[async_trait]
pub trait AvailabilityPersister: Send + Sync {
    async fn update_availability(
        &self,
        tutor_id: &str,
        schedule: &[TimeSlot],
    ) -> UpdateAvailabilityResponse;
}
