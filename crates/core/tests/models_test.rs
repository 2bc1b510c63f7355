use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string, to_value};
use serde_test::{assert_de_tokens_error, assert_tokens, Token};
use tutorly_core::models::{
    availability::{
        GetAvailabilityResponse, LocalTime, TimeSlot, UpdateAvailabilityRequest,
        UpdateAvailabilityResponse, WeeklyDay,
    },
    tutor::UpdateTutorProfileRequest,
};

fn t(s: &str) -> LocalTime {
    s.parse().expect("valid time")
}

#[rstest]
#[case("00:00", 0)]
#[case("09:00", 540)]
#[case("09:30", 570)]
#[case("23:59", 1439)]
fn test_local_time_parses_zero_padded(#[case] input: &str, #[case] minutes: u32) {
    let time: LocalTime = input.parse().expect("Failed to parse time");
    assert_eq!(time.minutes_since_midnight(), minutes);
    assert_eq!(time.to_string(), input);
}

#[rstest]
#[case("")]
#[case("9:00")]
#[case("09:0")]
#[case("24:00")]
#[case("12:60")]
#[case("12-30")]
#[case("ab:cd")]
#[case(" 09:00")]
#[case("+9:00")]
#[case("09:00:00")]
fn test_local_time_rejects_malformed(#[case] input: &str) {
    assert!(input.parse::<LocalTime>().is_err());
}

#[test]
fn test_local_time_constructors() {
    assert_eq!(LocalTime::from_hm(9, 30), Some(t("09:30")));
    assert_eq!(LocalTime::from_hm(24, 0), None);
    assert_eq!(LocalTime::from_hm(12, 60), None);
    assert_eq!(LocalTime::on_the_hour(9), t("09:00"));
    assert_eq!(LocalTime::on_the_hour(25), t("01:00"));

    let time = t("13:45");
    assert_eq!((time.hour(), time.minute()), (13, 45));
    assert_eq!(
        NaiveTime::from(time),
        NaiveTime::from_hms_opt(13, 45, 0).unwrap()
    );
}

#[test]
fn test_local_time_order_matches_string_order() {
    let mut times = vec![t("10:00"), t("09:59"), t("00:01"), t("23:00")];
    times.sort();
    let rendered: Vec<String> = times.iter().map(ToString::to_string).collect();

    let mut strings = rendered.clone();
    strings.sort();
    assert_eq!(rendered, strings);
}

#[test]
fn test_local_time_serde_tokens() {
    assert_tokens(&t("07:05"), &[Token::Str("07:05")]);
    assert_de_tokens_error::<LocalTime>(
        &[Token::Str("7:05")],
        "Validation error: Invalid time \"7:05\", expected HH:MM",
    );
}

#[test]
fn test_weekly_day_wire_names() {
    assert_tokens(
        &WeeklyDay::Wednesday,
        &[Token::UnitVariant {
            name: "WeeklyDay",
            variant: "WEDNESDAY",
        }],
    );
    for day in WeeklyDay::ALL {
        assert_eq!(day.as_str().parse::<WeeklyDay>().unwrap(), day);
    }
    assert!("Monday".parse::<WeeklyDay>().is_err());
}

#[test]
fn test_weekly_day_orders_monday_first() {
    let mut days = vec![WeeklyDay::Sunday, WeeklyDay::Monday, WeeklyDay::Friday];
    days.sort();
    assert_eq!(days, vec![WeeklyDay::Monday, WeeklyDay::Friday, WeeklyDay::Sunday]);
}

#[test]
fn test_update_availability_request_shape() {
    let body = json!({
        "schedule": [
            { "day": "MONDAY", "startTime": "09:00", "endTime": "17:00" }
        ]
    });

    let request: UpdateAvailabilityRequest =
        serde_json::from_value(body).expect("Failed to deserialize request");

    assert_eq!(
        request.schedule,
        vec![TimeSlot {
            day: WeeklyDay::Monday,
            start_time: t("09:00"),
            end_time: t("17:00"),
        }]
    );
}

#[test]
fn test_update_availability_request_requires_schedule() {
    assert!(from_str::<UpdateAvailabilityRequest>("{}").is_err());
    assert!(from_str::<UpdateAvailabilityRequest>(r#"{ "schedule": null }"#).is_err());

    let cleared: UpdateAvailabilityRequest =
        from_str(r#"{ "schedule": [] }"#).expect("Failed to deserialize request");
    assert!(cleared.schedule.is_empty());
}

#[test]
fn test_update_availability_response_shape() {
    assert_eq!(
        to_value(UpdateAvailabilityResponse::ok()).unwrap(),
        json!({ "success": true })
    );
    assert_eq!(
        to_value(UpdateAvailabilityResponse::failed("Failed to save schedule")).unwrap(),
        json!({ "success": false, "error": "Failed to save schedule" })
    );
}

#[test]
fn test_get_availability_response_serialization() {
    let response = GetAvailabilityResponse {
        tutor_id: "tutor-1".to_string(),
        slots: vec![TimeSlot {
            day: WeeklyDay::Sunday,
            start_time: t("18:00"),
            end_time: t("19:30"),
        }],
    };

    let json = to_string(&response).expect("Failed to serialize response");
    assert!(json.contains("\"tutorId\":\"tutor-1\""));

    let deserialized: GetAvailabilityResponse =
        from_str(&json).expect("Failed to deserialize response");
    assert_eq!(deserialized.slots, response.slots);
}

#[rstest]
#[case(vec![" Maths ", "Physics", "", "Maths"], vec!["Maths", "Physics"])]
#[case(vec![], vec![])]
#[case(vec!["  "], vec![])]
fn test_profile_subjects_normalized(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
    let request = UpdateTutorProfileRequest {
        bio: String::new(),
        price_per_hour: 40,
        subjects: input.into_iter().map(String::from).collect(),
    };

    assert_eq!(request.normalized_subjects().unwrap(), expected);
}

#[test]
fn test_profile_negative_price_rejected() {
    let request = UpdateTutorProfileRequest {
        bio: "Hi".to_string(),
        price_per_hour: -1,
        subjects: vec![],
    };

    assert!(request.normalized_subjects().is_err());
}
