use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::TutorlyError;

const TIME_FORMAT: &str = "%H:%M";

/// Day of the repeating week a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeeklyDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeeklyDay {
    pub const ALL: [WeeklyDay; 7] = [
        WeeklyDay::Monday,
        WeeklyDay::Tuesday,
        WeeklyDay::Wednesday,
        WeeklyDay::Thursday,
        WeeklyDay::Friday,
        WeeklyDay::Saturday,
        WeeklyDay::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeeklyDay::Monday => "MONDAY",
            WeeklyDay::Tuesday => "TUESDAY",
            WeeklyDay::Wednesday => "WEDNESDAY",
            WeeklyDay::Thursday => "THURSDAY",
            WeeklyDay::Friday => "FRIDAY",
            WeeklyDay::Saturday => "SATURDAY",
            WeeklyDay::Sunday => "SUNDAY",
        }
    }
}

impl fmt::Display for WeeklyDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeeklyDay {
    type Err = TutorlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeeklyDay::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| TutorlyError::Validation(format!("Unknown day: {}", s)))
    }
}

/// Wall-clock time of day with minute precision, written as zero-padded `HH:MM`.
///
/// Ordering is chronological, which matches the lexicographic order of the
/// `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime(NaiveTime);

impl LocalTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(LocalTime)
    }

    /// `hour:00`, wrapping past midnight.
    pub fn on_the_hour(hour: u32) -> Self {
        LocalTime(NaiveTime::default() + Duration::hours(i64::from(hour % 24)))
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl From<LocalTime> for NaiveTime {
    fn from(time: LocalTime) -> Self {
        time.0
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for LocalTime {
    type Err = TutorlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TutorlyError::Validation(format!("Invalid time {:?}, expected HH:MM", s));

        // chrono accepts single-digit hours, so padding is checked up front.
        if s.len() != 5 || !s.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return Err(invalid());
        }

        NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map(LocalTime)
            .map_err(|_| invalid())
    }
}

impl Serialize for LocalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One contiguous interval of availability on a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub day: WeeklyDay,
    pub start_time: LocalTime,
    pub end_time: LocalTime,
}

/// A slot as the editor holds it, already grouped under its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    pub start_time: LocalTime,
    pub end_time: LocalTime,
}

impl DaySlot {
    pub fn new(start_time: LocalTime, end_time: LocalTime) -> Self {
        Self { start_time, end_time }
    }

    pub fn on(self, day: WeeklyDay) -> TimeSlot {
        TimeSlot {
            day,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl From<TimeSlot> for DaySlot {
    fn from(slot: TimeSlot) -> Self {
        DaySlot::new(slot.start_time, slot.end_time)
    }
}

/// Which end of a slot an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotField {
    StartTime,
    EndTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub schedule: Vec<TimeSlot>,
}

/// Uniform pass/fail answer of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAvailabilityResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateAvailabilityResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAvailabilityResponse {
    pub tutor_id: String,
    pub slots: Vec<TimeSlot>,
}
