mod test_utils;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_negative_price_rejected_before_storage() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/api/tutors/tutor-1")
        .json(&json!({ "bio": "Hello", "pricePerHour": -5, "subjects": ["Maths"] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Validation error: Price per hour cannot be negative" })
    );
}

#[tokio::test]
async fn test_profile_update_storage_failure() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/api/tutors/tutor-1")
        .json(&json!({ "bio": "Hello", "pricePerHour": 30, "subjects": ["Maths"] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Database update failed." })
    );
}

#[tokio::test]
async fn test_profile_read_hides_storage_details() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/tutors/tutor-1").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[rstest]
#[case::dashes("/api/profiles/---")]
#[case::blank("/api/profiles/%20")]
#[tokio::test]
async fn test_blank_profile_username_rejected(#[case] path: &str) {
    let ctx = TestContext::new();

    let response = ctx.server.get(path).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Validation error: Tutor name cannot be empty" })
    );
}

#[tokio::test]
async fn test_profile_by_username_reaches_storage() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/profiles/sarah-smith").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));

    let response = ctx.server.get("/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let response = ctx.server.get("/version").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "tutorly-api");
}
