//! # Error Handling Middleware
//!
//! Maps Tutorly's domain errors to HTTP status codes and JSON error bodies so
//! every handler fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use tutorly_core::errors::TutorlyError;

/// Application error wrapper that provides HTTP status code mapping
///
/// Storage failures are logged in full and answered with a generic message.
#[derive(Debug)]
pub struct AppError(pub TutorlyError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TutorlyError::NotFound(_) => StatusCode::NOT_FOUND,
            TutorlyError::Validation(_) | TutorlyError::MissingIdentifier => {
                StatusCode::BAD_REQUEST
            }
            TutorlyError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `TutorlyResult` inside handlers
impl From<TutorlyError> for AppError {
    fn from(err: TutorlyError) -> Self {
        AppError(err)
    }
}

/// Allows `?` on repository results inside handlers
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TutorlyError::Database(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: TutorlyError) -> StatusCode {
        AppError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(TutorlyError::NotFound("tutor".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TutorlyError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(TutorlyError::MissingIdentifier),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(TutorlyError::Database(eyre::eyre!("connection reset"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
