use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/tutors/:id",
            get(handlers::tutor::get_tutor).put(handlers::tutor::update_tutor),
        )
        .route(
            "/api/profiles/:username",
            get(handlers::tutor::get_tutor_by_username),
        )
}
