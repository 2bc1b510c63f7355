//! # Availability storage
//!
//! The persister only ever talks to storage through [`AvailabilityStore`] and
//! the [`SlotTransaction`] it hands out. A transaction that is dropped without
//! [`SlotTransaction::commit`] rolls back, so an early return with `?` never
//! leaves half a schedule behind.

use async_trait::async_trait;
use eyre::Result;
use sqlx::{Postgres, QueryBuilder, Transaction};
use tracing::debug;
use tutorly_core::models::availability::TimeSlot;
use uuid::Uuid;

use crate::models::{rows_to_slots, DbAvailability};
use crate::DbPool;

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Opens a transaction in which deletes and inserts become visible together.
    async fn begin(&self) -> Result<Box<dyn SlotTransaction>>;

    /// Every slot stored for the tutor, ordered by day then start time.
    async fn find_slots(&self, tutor_id: &str) -> Result<Vec<TimeSlot>>;
}

#[async_trait]
pub trait SlotTransaction: Send {
    /// Returns the number of rows removed.
    async fn delete_all_slots(&mut self, tutor_id: &str) -> Result<u64>;

    /// Returns the number of rows written.
    async fn insert_slots(&mut self, tutor_id: &str, slots: &[TimeSlot]) -> Result<u64>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PgAvailabilityStore {
    pool: DbPool,
}

impl PgAvailabilityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for PgAvailabilityStore {
    async fn begin(&self) -> Result<Box<dyn SlotTransaction>> {
        let mut tx = self.pool.begin().await?;

        // Two saves for the same tutor must not interleave their rows.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgSlotTransaction { tx }))
    }

    async fn find_slots(&self, tutor_id: &str) -> Result<Vec<TimeSlot>> {
        debug!("Getting availability for tutor: {}", tutor_id);

        let rows = sqlx::query_as::<_, DbAvailability>(
            r#"
            SELECT id, tutor_id, day, start_time, end_time, created_at
            FROM availability
            WHERE tutor_id = $1
            ORDER BY start_time ASC
            "#,
        )
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;

        rows_to_slots(&rows)
    }
}

pub struct PgSlotTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SlotTransaction for PgSlotTransaction {
    async fn delete_all_slots(&mut self, tutor_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM availability
            WHERE tutor_id = $1
            "#,
        )
        .bind(tutor_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn insert_slots(&mut self, tutor_id: &str, slots: &[TimeSlot]) -> Result<u64> {
        if slots.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO availability (id, tutor_id, day, start_time, end_time) ");
        builder.push_values(slots, |mut row, slot| {
            row.push_bind(Uuid::new_v4())
                .push_bind(tutor_id.to_string())
                .push_bind(slot.day.as_str())
                .push_bind(slot.start_time.to_string())
                .push_bind(slot.end_time.to_string());
        });

        let result = builder.build().execute(&mut *self.tx).await?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
