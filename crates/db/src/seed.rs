//! Demo data for a fresh database: one tutor teaching English, two students
//! on her roster, and a confirmed lesson tomorrow morning.
//!
//! Running it again leaves existing rows alone.

use chrono::{DateTime, Days, Duration, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;
use tutorly_core::models::lesson::LessonStatus;
use uuid::Uuid;

use crate::repositories::student::link_student;

pub const SEED_TUTOR_EMAIL: &str = "sarah.smith@tutorly.com";
pub const SEED_SUBJECTS: [&str; 2] = ["English", "Mathematics"];

const SEED_TUTOR_NAME: &str = "Dr. Sarah Smith";
const SEED_TUTOR_DURATION: i32 = 45;
const SEED_STUDENTS: [(&str, &str); 2] = [
    ("Alice Wonderland", "alice@example.com"),
    ("Bob Builder", "bob.builder@example.com"),
];

/// Start of the seeded lesson: 10:00 UTC on the day after `now`.
pub fn seed_lesson_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.date_naive() + Days::new(1);
    tomorrow.and_time(NaiveTime::default() + Duration::hours(10)).and_utc()
}

pub async fn seed_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Seeding database...");

    let mut subject_ids = Vec::with_capacity(SEED_SUBJECTS.len());
    for name in SEED_SUBJECTS {
        subject_ids.push(upsert_subject(pool, name).await?);
    }

    let tutor_id = upsert_tutor(pool).await?;

    // Only English is taught; Mathematics is seeded for later profile edits.
    sqlx::query(
        r#"
        INSERT INTO tutor_subjects (tutor_id, subject_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(&tutor_id)
    .bind(subject_ids[0])
    .execute(pool)
    .await?;

    let mut student_ids = Vec::with_capacity(SEED_STUDENTS.len());
    for (name, email) in SEED_STUDENTS {
        let student_id = upsert_student(pool, name, email).await?;
        link_student(pool, &tutor_id, &student_id).await?;
        student_ids.push(student_id);
    }

    let start = seed_lesson_start(Utc::now());
    let end = start + Duration::minutes(i64::from(SEED_TUTOR_DURATION));

    let inserted = sqlx::query(
        r#"
        INSERT INTO lessons (id, tutor_id, student_id, start_time, end_time, status)
        SELECT $1, $2, $3, $4, $5, $6
        WHERE NOT EXISTS (SELECT 1 FROM lessons WHERE tutor_id = $2)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&tutor_id)
    .bind(&student_ids[0])
    .bind(start)
    .bind(end)
    .bind(LessonStatus::Confirmed.as_str())
    .execute(pool)
    .await?
    .rows_affected();

    info!(
        tutor_id = %tutor_id,
        students = student_ids.len(),
        lessons_added = inserted,
        "Database seeded."
    );
    Ok(())
}

async fn upsert_subject(pool: &Pool<Postgres>, name: &str) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO subjects (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

// The no-op updates below make RETURNING yield the stored id on conflict.

async fn upsert_tutor(pool: &Pool<Postgres>) -> Result<String> {
    let id = sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO tutors (id, name, email, default_duration)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(SEED_TUTOR_NAME)
    .bind(SEED_TUTOR_EMAIL)
    .bind(SEED_TUTOR_DURATION)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn upsert_student(pool: &Pool<Postgres>, name: &str, email: &str) -> Result<String> {
    let id = sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO students (id, name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
