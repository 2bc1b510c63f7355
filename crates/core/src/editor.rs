//! # Schedule Editor
//!
//! Holds a tutor's tentative weekly schedule while it is being edited and
//! checks it before it is handed to an [`AvailabilityPersister`].
//!
//! [`EditorState`] is a plain value. Every edit borrows the current state and
//! returns the next one, so the previous state is still around when an edit
//! is rejected or a save fails.

use std::collections::BTreeMap;

use crate::errors::{DayErrors, SlotError, TutorlyError, TutorlyResult};
use crate::models::availability::{DaySlot, LocalTime, SlotField, TimeSlot, WeeklyDay};
use crate::persister::AvailabilityPersister;

pub const INVALID_SCHEDULE_MESSAGE: &str = "Please fix the errors in your schedule before saving.";
pub const SAVED_MESSAGE: &str = "Schedule saved successfully.";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving schedule.";

/// Slot a freshly added row starts with (09:00 to 10:00).
pub fn default_slot() -> DaySlot {
    DaySlot::new(LocalTime::on_the_hour(9), LocalTime::on_the_hour(10))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    slots: BTreeMap<WeeklyDay, Vec<DaySlot>>,
    errors: DayErrors,
}

/// Result of [`EditorState::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A week with no availability on any day.
    pub fn new() -> Self {
        Self {
            slots: WeeklyDay::ALL.into_iter().map(|day| (day, Vec::new())).collect(),
            errors: DayErrors::default(),
        }
    }

    /// Seeds the editor from stored rows, keeping their order within each day.
    pub fn from_slots(initial: &[TimeSlot]) -> Self {
        let mut state = Self::new();
        for slot in initial {
            state.day_mut(slot.day).push(DaySlot::from(*slot));
        }
        state
    }

    pub fn slots(&self, day: WeeklyDay) -> &[DaySlot] {
        self.slots.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn error(&self, day: WeeklyDay) -> Option<SlotError> {
        self.errors.get(day)
    }

    pub fn errors(&self) -> &DayErrors {
        &self.errors
    }

    pub fn add_slot(&self, day: WeeklyDay) -> EditorState {
        let mut next = self.touched(day);
        next.day_mut(day).push(default_slot());
        next
    }

    pub fn remove_slot(&self, day: WeeklyDay, index: usize) -> TutorlyResult<EditorState> {
        self.check_index(day, index)?;
        let mut next = self.touched(day);
        next.day_mut(day).remove(index);
        Ok(next)
    }

    pub fn update_slot(
        &self,
        day: WeeklyDay,
        index: usize,
        field: SlotField,
        value: LocalTime,
    ) -> TutorlyResult<EditorState> {
        self.check_index(day, index)?;
        let mut next = self.touched(day);
        let slot = &mut next.day_mut(day)[index];
        match field {
            SlotField::StartTime => slot.start_time = value,
            SlotField::EndTime => slot.end_time = value,
        }
        Ok(next)
    }

    /// Checks every day independently; at most one error is reported per day.
    pub fn validate(&self) -> Result<(), DayErrors> {
        let errors: BTreeMap<_, _> = self
            .slots
            .iter()
            .filter_map(|(day, slots)| validate_day(slots).map(|err| (*day, err)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DayErrors(errors))
        }
    }

    /// Flattens the week into the order the persister stores it: Monday
    /// first, each day sorted by start time.
    pub fn to_payload(&self) -> Vec<TimeSlot> {
        self.slots
            .iter()
            .flat_map(|(day, slots)| sorted_by_start(slots).into_iter().map(move |slot| slot.on(*day)))
            .collect()
    }

    /// Validates and, only if every day is valid, submits the week.
    ///
    /// The returned state carries the validation errors of a rejected save.
    /// Slot lists are never changed, so a failed save can be retried as is.
    pub async fn save<P>(&self, tutor_id: &str, persister: &P) -> (EditorState, SaveOutcome)
    where
        P: AvailabilityPersister + ?Sized,
    {
        if let Err(found) = self.validate() {
            let mut next = self.clone();
            next.errors.0.extend(found.0);
            let outcome = SaveOutcome {
                success: false,
                message: Some(INVALID_SCHEDULE_MESSAGE.to_string()),
            };
            return (next, outcome);
        }

        let payload = self.to_payload();
        let response = persister.update_availability(tutor_id, &payload).await;

        let mut next = self.clone();
        let outcome = if response.success {
            next.errors = DayErrors::default();
            SaveOutcome {
                success: true,
                message: Some(SAVED_MESSAGE.to_string()),
            }
        } else {
            SaveOutcome {
                success: false,
                message: Some(response.error.unwrap_or_else(|| SAVE_FAILED_MESSAGE.to_string())),
            }
        };
        (next, outcome)
    }

    fn touched(&self, day: WeeklyDay) -> EditorState {
        let mut next = self.clone();
        next.errors.0.remove(&day);
        next
    }

    fn day_mut(&mut self, day: WeeklyDay) -> &mut Vec<DaySlot> {
        self.slots.entry(day).or_default()
    }

    fn check_index(&self, day: WeeklyDay, index: usize) -> TutorlyResult<()> {
        let len = self.slots(day).len();
        if index < len {
            Ok(())
        } else {
            Err(TutorlyError::Validation(format!(
                "Slot {} does not exist on {} ({} slots)",
                index, day, len
            )))
        }
    }
}

/// First problem on one day, if any. An empty day is always valid.
pub fn validate_day(slots: &[DaySlot]) -> Option<SlotError> {
    let sorted = sorted_by_start(slots);

    for (i, current) in sorted.iter().enumerate() {
        if current.start_time >= current.end_time {
            return Some(SlotError::EndBeforeStart);
        }
        if i > 0 && current.start_time < sorted[i - 1].end_time {
            return Some(SlotError::Overlap);
        }
    }
    None
}

/// Applies [`validate_day`] to a flat list of slots grouped by their day.
pub fn validate_schedule(schedule: &[TimeSlot]) -> Result<(), DayErrors> {
    EditorState::from_slots(schedule).validate()
}

fn sorted_by_start(slots: &[DaySlot]) -> Vec<DaySlot> {
    let mut sorted = slots.to_vec();
    // Stable, so equal starts keep their entry order.
    sorted.sort_by_key(|slot| slot.start_time);
    sorted
}
