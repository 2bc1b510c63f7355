use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tutorly_core::{
    errors::TutorlyError,
    models::lesson::{BookLessonRequest, Lesson},
};
use tutorly_db::repositories::lesson;

use crate::{middleware::error_handling::AppError, ApiState};

/// `POST /api/lessons`
///
/// The lesson always runs one hour from `startTime` and starts out pending.
#[axum::debug_handler]
pub async fn book_lesson(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookLessonRequest>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    payload.validate()?;

    let booked = lesson::book_lesson(&state.db_pool, &payload)
        .await?
        .ok_or_else(|| {
            TutorlyError::NotFound(format!(
                "Tutor {} or student {}",
                payload.tutor_id, payload.student_id
            ))
        })?;

    Ok((StatusCode::CREATED, Json(booked.to_lesson()?)))
}
