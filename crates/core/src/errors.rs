use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::availability::WeeklyDay;

#[derive(Error, Debug)]
pub enum TutorlyError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No tutor ID provided")]
    MissingIdentifier,

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

pub type TutorlyResult<T> = Result<T, TutorlyError>;

/// The first problem found on a single day of a weekly schedule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotError {
    #[error("End time must be after start time")]
    EndBeforeStart,

    #[error("Time slots cannot overlap")]
    Overlap,
}

/// Per-day validation failures, at most one per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayErrors(pub BTreeMap<WeeklyDay, SlotError>);

impl DayErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, day: WeeklyDay) -> Option<SlotError> {
        self.0.get(&day).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeeklyDay, SlotError)> + '_ {
        self.0.iter().map(|(day, err)| (*day, *err))
    }
}

impl fmt::Display for DayErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (day, err) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", day, err)?;
            first = false;
        }
        Ok(())
    }
}

impl From<DayErrors> for TutorlyError {
    fn from(errors: DayErrors) -> Self {
        TutorlyError::Validation(errors.to_string())
    }
}
