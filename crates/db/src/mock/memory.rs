use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use eyre::{eyre, Result};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tutorly_core::models::availability::TimeSlot;

use crate::models::{rows_to_slots, DbAvailability};
use crate::store::{AvailabilityStore, SlotTransaction};

type Rows = HashMap<String, Vec<DbAvailability>>;

/// In-process [`AvailabilityStore`].
///
/// Transactions work on a private copy of the rows and hold the store lock
/// until they commit or are dropped, so they are fully serialized. Inserts can
/// be made to fail to exercise rollback.
#[derive(Debug, Clone, Default)]
pub struct MemoryAvailabilityStore {
    rows: Arc<Mutex<Rows>>,
    fail_inserts: Arc<AtomicBool>,
    transactions: Arc<AtomicUsize>,
}

impl MemoryAvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `insert_slots` call fail.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of transactions opened so far.
    pub fn transactions_started(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }

    /// Seeds rows outside of any transaction.
    pub async fn insert_committed(&self, tutor_id: &str, slots: &[TimeSlot]) {
        let mut rows = self.rows.lock().await;
        rows.entry(tutor_id.to_string())
            .or_default()
            .extend(slots.iter().map(|slot| DbAvailability::new(tutor_id, slot)));
    }

    /// Raw stored row count for a tutor.
    pub async fn row_count(&self, tutor_id: &str) -> usize {
        self.rows.lock().await.get(tutor_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl AvailabilityStore for MemoryAvailabilityStore {
    async fn begin(&self) -> Result<Box<dyn SlotTransaction>> {
        let guard = Arc::clone(&self.rows).lock_owned().await;
        self.transactions.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(MemorySlotTransaction {
            working: guard.clone(),
            guard,
            fail_inserts: Arc::clone(&self.fail_inserts),
        }))
    }

    async fn find_slots(&self, tutor_id: &str) -> Result<Vec<TimeSlot>> {
        let rows = self.rows.lock().await;
        match rows.get(tutor_id) {
            Some(rows) => rows_to_slots(rows),
            None => Ok(Vec::new()),
        }
    }
}

pub struct MemorySlotTransaction {
    guard: OwnedMutexGuard<Rows>,
    working: Rows,
    fail_inserts: Arc<AtomicBool>,
}

#[async_trait]
impl SlotTransaction for MemorySlotTransaction {
    async fn delete_all_slots(&mut self, tutor_id: &str) -> Result<u64> {
        let removed = self.working.remove(tutor_id).map_or(0, |rows| rows.len());
        Ok(removed as u64)
    }

    async fn insert_slots(&mut self, tutor_id: &str, slots: &[TimeSlot]) -> Result<u64> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(eyre!("insert into availability failed"));
        }

        self.working
            .entry(tutor_id.to_string())
            .or_default()
            .extend(slots.iter().map(|slot| DbAvailability::new(tutor_id, slot)));
        Ok(slots.len() as u64)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemorySlotTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}
