use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TutorlyError, TutorlyResult};

/// Length of every booked lesson, whatever end time the caller asked for.
pub const LESSON_LENGTH_MINUTES: i64 = 60;

/// Upcoming lessons shown on the dashboard.
pub const UPCOMING_LIMIT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl LessonStatus {
    /// Statuses that still count as scheduled.
    pub const UPCOMING: [LessonStatus; 2] = [LessonStatus::Pending, LessonStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Pending => "PENDING",
            LessonStatus::Confirmed => "CONFIRMED",
            LessonStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_upcoming(&self) -> bool {
        Self::UPCOMING.contains(self)
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = TutorlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(LessonStatus::Pending),
            "CONFIRMED" => Ok(LessonStatus::Confirmed),
            "CANCELLED" => Ok(LessonStatus::Cancelled),
            other => Err(TutorlyError::Validation(format!(
                "Unknown lesson status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub tutor_id: String,
    pub student_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: LessonStatus,
}

impl Lesson {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLessonRequest {
    pub tutor_id: String,
    pub student_id: String,
    pub start_time: DateTime<Utc>,
}

impl BookLessonRequest {
    pub fn validate(&self) -> TutorlyResult<()> {
        if self.tutor_id.trim().is_empty() {
            return Err(TutorlyError::MissingIdentifier);
        }
        if self.student_id.trim().is_empty() {
            return Err(TutorlyError::Validation("No student ID provided".to_string()));
        }
        Ok(())
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(LESSON_LENGTH_MINUTES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingLesson {
    pub id: Uuid,
    pub student_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: LessonStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub lesson_count: i64,
    pub student_count: i64,
    pub hours_taught: i64,
    pub upcoming: Vec<UpcomingLesson>,
}

/// Whole hours covered by the given `(start, end)` spans, rounded down after
/// summing.
pub fn hours_taught<I>(spans: I) -> i64
where
    I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
{
    let total: Duration = spans
        .into_iter()
        .fold(Duration::zero(), |acc, (start, end)| acc + (end - start));
    total.num_seconds().div_euclid(3600)
}
