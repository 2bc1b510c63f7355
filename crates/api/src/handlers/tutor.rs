use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::error;
use tutorly_core::{
    errors::TutorlyError,
    models::tutor::{
        name_from_slug, TutorProfile, UpdateTutorProfileRequest, UpdateTutorProfileResponse,
    },
};
use tutorly_db::models::DbTutor;
use tutorly_db::repositories::{availability::find_availability, tutor};

use crate::{middleware::error_handling::AppError, ApiState};

pub const PROFILE_UPDATE_FAILED_MESSAGE: &str = "Database update failed.";

#[axum::debug_handler]
pub async fn get_tutor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<TutorProfile>, AppError> {
    let db_tutor = tutor::get_tutor_by_id(&state.db_pool, &id)
        .await?
        .ok_or_else(|| TutorlyError::NotFound(format!("Tutor with ID {} not found", id)))?;

    Ok(Json(load_profile(&state, db_tutor).await?))
}

/// `GET /api/profiles/:username`, where the username is the tutor's name
/// with spaces written as dashes.
#[axum::debug_handler]
pub async fn get_tutor_by_username(
    State(state): State<Arc<ApiState>>,
    Path(username): Path<String>,
) -> Result<Json<TutorProfile>, AppError> {
    let name = name_from_slug(&username)?;

    let db_tutor = tutor::find_tutor_by_name(&state.db_pool, &name)
        .await?
        .ok_or_else(|| TutorlyError::NotFound(format!("Tutor named {} not found", name)))?;

    Ok(Json(load_profile(&state, db_tutor).await?))
}

async fn load_profile(state: &ApiState, db_tutor: DbTutor) -> Result<TutorProfile, AppError> {
    let subjects = tutor::get_tutor_subjects(&state.db_pool, &db_tutor.id).await?;
    let availability = find_availability(state.availability.as_ref(), &db_tutor.id).await?;

    Ok(TutorProfile {
        id: db_tutor.id,
        name: db_tutor.name,
        email: db_tutor.email,
        bio: db_tutor.bio,
        price_per_hour: db_tutor.price_per_hour,
        default_duration: db_tutor.default_duration,
        subjects: subjects.into_iter().map(|subject| subject.name).collect(),
        availability,
        created_at: db_tutor.created_at,
    })
}

#[axum::debug_handler]
pub async fn update_tutor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTutorProfileRequest>,
) -> Result<(StatusCode, Json<UpdateTutorProfileResponse>), AppError> {
    if id.trim().is_empty() {
        return Err(AppError(TutorlyError::MissingIdentifier));
    }
    let subjects = payload.normalized_subjects()?;

    tracing::info!(tutor_id = %id, subjects = ?subjects, "Updating tutor profile");

    let updated =
        tutor::update_tutor_profile(&state.db_pool, &id, &payload.bio, payload.price_per_hour, &subjects)
            .await;

    match updated {
        Ok(Some(_)) => Ok((
            StatusCode::OK,
            Json(UpdateTutorProfileResponse {
                success: true,
                error: None,
            }),
        )),
        Ok(None) => Err(AppError(TutorlyError::NotFound(format!(
            "Tutor with ID {} not found",
            id
        )))),
        Err(err) => {
            error!(tutor_id = %id, "Tutor profile update failed: {:?}", err);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UpdateTutorProfileResponse {
                    success: false,
                    error: Some(PROFILE_UPDATE_FAILED_MESSAGE.to_string()),
                }),
            ))
        }
    }
}
