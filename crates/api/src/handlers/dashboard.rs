use axum::{extract::State, Json};
use std::sync::Arc;
use tutorly_core::models::{lesson::DashboardStats, student::Student};
use tutorly_db::repositories::{lesson, student};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = lesson::dashboard_stats(&state.db_pool).await?;
    Ok(Json(stats))
}

#[axum::debug_handler]
pub async fn list_students(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = student::list_students(&state.db_pool).await?;
    Ok(Json(students.iter().map(|s| s.to_student()).collect()))
}
