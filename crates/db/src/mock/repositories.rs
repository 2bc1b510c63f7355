use async_trait::async_trait;
use mockall::mock;
use tutorly_core::models::availability::TimeSlot;

use crate::store::{AvailabilityStore, SlotTransaction};

// Mock availability storage for testing
mock! {
    pub Store {}

    #[async_trait]
    impl AvailabilityStore for Store {
        async fn begin(&self) -> eyre::Result<Box<dyn SlotTransaction>>;

        async fn find_slots(&self, tutor_id: &str) -> eyre::Result<Vec<TimeSlot>>;
    }
}
