pub mod memory;
pub mod repositories;

pub use memory::MemoryAvailabilityStore;
pub use repositories::MockStore;
