use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{TutorlyError, TutorlyResult};
use crate::models::availability::TimeSlot;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub price_per_hour: i32,
    pub default_duration: i32,
    pub subjects: Vec<String>,
    pub availability: Vec<TimeSlot>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTutorProfileRequest {
    #[serde(default)]
    pub bio: String,
    pub price_per_hour: i32,
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl UpdateTutorProfileRequest {
    /// Checks the price and returns the subject names trimmed, without blanks
    /// or repeats, in first-seen order.
    pub fn normalized_subjects(&self) -> TutorlyResult<Vec<String>> {
        if self.price_per_hour < 0 {
            return Err(TutorlyError::Validation(
                "Price per hour cannot be negative".to_string(),
            ));
        }

        let mut subjects: Vec<String> = Vec::with_capacity(self.subjects.len());
        for name in &self.subjects {
            let name = name.trim();
            if !name.is_empty() && !subjects.iter().any(|s| s == name) {
                subjects.push(name.to_string());
            }
        }
        Ok(subjects)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTutorProfileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Turns a profile URL slug such as `sarah-smith` into the name fragment
/// `sarah smith` that tutor lookup matches against.
pub fn name_from_slug(slug: &str) -> TutorlyResult<String> {
    let name = slug.split('-').collect::<Vec<_>>().join(" ");
    let name = name.trim();
    if name.is_empty() {
        return Err(TutorlyError::Validation("Tutor name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}
