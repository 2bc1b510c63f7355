use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_value, json, to_value};
use tutorly_core::errors::TutorlyError;
use tutorly_core::models::lesson::{
    hours_taught, BookLessonRequest, DashboardStats, LessonStatus, UpcomingLesson,
};
use tutorly_core::models::tutor::name_from_slug;
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
}

fn request(tutor_id: &str, student_id: &str) -> BookLessonRequest {
    BookLessonRequest {
        tutor_id: tutor_id.to_string(),
        student_id: student_id.to_string(),
        start_time: at(10, 0),
    }
}

#[test]
fn test_booked_lesson_lasts_one_hour() {
    let body = json!({
        "tutorId": "tutor-1",
        "studentId": "student-1",
        "startTime": "2025-03-10T10:00:00Z",
        "endTime": "2025-03-10T10:15:00Z"
    });

    let request: BookLessonRequest = from_value(body).expect("Failed to deserialize request");

    assert!(request.validate().is_ok());
    assert_eq!(request.start_time, at(10, 0));
    assert_eq!(request.end_time(), at(11, 0));
}

#[test]
fn test_booking_requires_tutor_first() {
    assert!(matches!(
        request(" ", "").validate(),
        Err(TutorlyError::MissingIdentifier)
    ));

    let err = request("tutor-1", "  ").validate().unwrap_err();
    assert_eq!(err.to_string(), "Validation error: No student ID provided");
}

#[rstest]
#[case(LessonStatus::Pending, "PENDING", true)]
#[case(LessonStatus::Confirmed, "CONFIRMED", true)]
#[case(LessonStatus::Cancelled, "CANCELLED", false)]
fn test_lesson_status_names(
    #[case] status: LessonStatus,
    #[case] wire: &str,
    #[case] upcoming: bool,
) {
    assert_eq!(to_value(status).unwrap(), json!(wire));
    assert_eq!(wire.parse::<LessonStatus>().unwrap(), status);
    assert_eq!(status.is_upcoming(), upcoming);
}

#[test]
fn test_unknown_lesson_status_rejected() {
    assert!("pending".parse::<LessonStatus>().is_err());
    assert!("DONE".parse::<LessonStatus>().is_err());
}

#[test]
fn test_hours_taught_floors_the_total() {
    assert_eq!(hours_taught(Vec::<(DateTime<Utc>, DateTime<Utc>)>::new()), 0);

    // 45 + 45 + 45 minutes is 2h15m.
    let spans = vec![
        (at(9, 0), at(9, 45)),
        (at(10, 0), at(10, 45)),
        (at(11, 0), at(11, 45)),
    ];
    assert_eq!(hours_taught(spans), 2);

    // Partial lessons only count once they add up to an hour.
    let spans = vec![(at(9, 0), at(9, 30)), (at(14, 0), at(14, 29))];
    assert_eq!(hours_taught(spans), 0);

    let spans = vec![(at(8, 0), at(8, 0) + Duration::minutes(180))];
    assert_eq!(hours_taught(spans), 3);
}

#[test]
fn test_dashboard_stats_shape() {
    let id = Uuid::nil();
    let stats = DashboardStats {
        lesson_count: 3,
        student_count: 2,
        hours_taught: 1,
        upcoming: vec![UpcomingLesson {
            id,
            student_name: "Alice Wonderland".to_string(),
            start_time: at(10, 0),
            end_time: at(10, 45),
            status: LessonStatus::Confirmed,
        }],
    };

    assert_eq!(
        to_value(&stats).unwrap(),
        json!({
            "lessonCount": 3,
            "studentCount": 2,
            "hoursTaught": 1,
            "upcoming": [{
                "id": "00000000-0000-0000-0000-000000000000",
                "studentName": "Alice Wonderland",
                "startTime": "2025-03-10T10:00:00Z",
                "endTime": "2025-03-10T10:45:00Z",
                "status": "CONFIRMED"
            }]
        })
    );
}

#[rstest]
#[case("sarah-smith", "sarah smith")]
#[case("Dr-Sarah-Smith", "Dr Sarah Smith")]
#[case("-smith-", "smith")]
#[case("sarah", "sarah")]
fn test_name_from_slug(#[case] slug: &str, #[case] name: &str) {
    assert_eq!(name_from_slug(slug).unwrap(), name);
}

#[rstest]
#[case("")]
#[case("---")]
#[case(" - ")]
fn test_blank_slug_rejected(#[case] slug: &str) {
    assert!(matches!(name_from_slug(slug), Err(TutorlyError::Validation(_))));
}
