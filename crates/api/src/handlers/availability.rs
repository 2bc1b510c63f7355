//! # Availability Handlers
//!
//! Read and replace a tutor's weekly availability.
//!
//! A save re-runs the editor's per-day checks on the submitted week before
//! anything reaches storage, then replaces the stored week as one unit.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tutorly_core::{
    editor::validate_schedule,
    errors::TutorlyError,
    models::availability::{
        GetAvailabilityResponse, UpdateAvailabilityRequest, UpdateAvailabilityResponse,
    },
};
use tutorly_db::repositories::availability;

use crate::{middleware::error_handling::AppError, ApiState};

/// `GET /api/tutors/:id/availability`
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(tutor_id): Path<String>,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    let slots = availability::find_availability(state.availability.as_ref(), &tutor_id).await?;

    Ok(Json(GetAvailabilityResponse { tutor_id, slots }))
}

/// `PUT /api/tutors/:id/availability`
///
/// Answers 400 for a blank tutor id or an invalid week, 500 with `{ success: false }` when the
/// transaction fails, 200 with `{ success: true }` otherwise.
#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    Path(tutor_id): Path<String>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<(StatusCode, Json<UpdateAvailabilityResponse>), AppError> {
    if tutor_id.trim().is_empty() {
        return Err(AppError(TutorlyError::MissingIdentifier));
    }
    validate_schedule(&payload.schedule).map_err(TutorlyError::from)?;

    let response =
        availability::update_availability(state.availability.as_ref(), &tutor_id, &payload.schedule)
            .await;

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(response)))
}
