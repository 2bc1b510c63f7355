use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tutorly_core::models::availability::TimeSlot;
use tutorly_core::models::lesson::{Lesson, LessonStatus, UpcomingLesson};
use tutorly_core::models::student::Student;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTutor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub price_per_hour: i32,
    pub default_duration: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubject {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: Uuid,
    pub tutor_id: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

impl DbAvailability {
    pub fn new(tutor_id: &str, slot: &TimeSlot) -> Self {
        Self {
            id: Uuid::new_v4(),
            tutor_id: tutor_id.to_string(),
            day: slot.day.to_string(),
            start_time: slot.start_time.to_string(),
            end_time: slot.end_time.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn to_slot(&self) -> Result<TimeSlot> {
        let slot = TimeSlot {
            day: self.day.parse()?,
            start_time: self.start_time.parse()?,
            end_time: self.end_time.parse()?,
        };
        Ok(slot)
    }
}

/// Converts stored rows, ordered by day then start time.
pub fn rows_to_slots(rows: &[DbAvailability]) -> Result<Vec<TimeSlot>> {
    let mut slots = rows
        .iter()
        .map(|row| {
            row.to_slot()
                .wrap_err_with(|| format!("Corrupt availability row {}", row.id))
        })
        .collect::<Result<Vec<_>>>()?;
    slots.sort_by_key(|slot| (slot.day, slot.start_time));
    Ok(slots)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl DbStudent {
    pub fn to_student(&self) -> Student {
        Student {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLesson {
    pub id: Uuid,
    pub tutor_id: String,
    pub student_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbLesson {
    pub fn to_lesson(&self) -> Result<Lesson> {
        let status = self
            .status
            .parse::<LessonStatus>()
            .wrap_err_with(|| format!("Corrupt lesson row {}", self.id))?;

        Ok(Lesson {
            id: self.id,
            tutor_id: self.tutor_id.clone(),
            student_id: self.student_id.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            status,
        })
    }
}

/// A lesson joined with the name of its student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUpcomingLesson {
    pub id: Uuid,
    pub student_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

impl DbUpcomingLesson {
    pub fn to_upcoming(&self) -> Result<UpcomingLesson> {
        let status = self
            .status
            .parse::<LessonStatus>()
            .wrap_err_with(|| format!("Corrupt lesson row {}", self.id))?;

        Ok(UpcomingLesson {
            id: self.id,
            student_name: self.student_name.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            status,
        })
    }
}
