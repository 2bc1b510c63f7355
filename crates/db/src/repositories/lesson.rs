use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use tutorly_core::models::lesson::{
    hours_taught, BookLessonRequest, DashboardStats, LessonStatus, UPCOMING_LIMIT,
};
use uuid::Uuid;

use crate::models::{DbLesson, DbUpcomingLesson};
use crate::repositories::student::count_students;

/// Books a one-hour lesson in `PENDING` state.
///
/// Returns `None` when the tutor or the student does not exist.
pub async fn book_lesson(
    pool: &Pool<Postgres>,
    request: &BookLessonRequest,
) -> Result<Option<DbLesson>> {
    tracing::info!(
        tutor_id = %request.tutor_id,
        student_id = %request.student_id,
        start_time = %request.start_time,
        "Booking lesson"
    );

    let inserted = sqlx::query_as::<_, DbLesson>(
        r#"
        INSERT INTO lessons (id, tutor_id, student_id, start_time, end_time, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, tutor_id, student_id, start_time, end_time, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.tutor_id)
    .bind(&request.student_id)
    .bind(request.start_time)
    .bind(request.end_time())
    .bind(LessonStatus::Pending.as_str())
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(lesson) => Ok(Some(lesson)),
        Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
            tracing::warn!("Booking refers to an unknown tutor or student: {}", err);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn count_lessons(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lessons")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Start and end of every lesson ever booked.
pub async fn lesson_spans(pool: &Pool<Postgres>) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    let spans = sqlx::query_as::<_, (DateTime<Utc>, DateTime<Utc>)>(
        r#"
        SELECT start_time, end_time
        FROM lessons
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(spans)
}

/// Earliest pending or confirmed lessons, soonest first.
pub async fn upcoming_lessons(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbUpcomingLesson>> {
    let statuses: Vec<&str> = LessonStatus::UPCOMING.iter().map(|s| s.as_str()).collect();

    let lessons = sqlx::query_as::<_, DbUpcomingLesson>(
        r#"
        SELECT l.id, s.name AS student_name, l.start_time, l.end_time, l.status
        FROM lessons l
        JOIN students s ON s.id = l.student_id
        WHERE l.status = ANY($1)
        ORDER BY l.start_time ASC, l.id ASC
        LIMIT $2
        "#,
    )
    .bind(&statuses)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(lessons)
}

/// Totals for the tutor dashboard.
pub async fn dashboard_stats(pool: &Pool<Postgres>) -> Result<DashboardStats> {
    let lesson_count = count_lessons(pool).await?;
    let student_count = count_students(pool).await?;
    let hours = hours_taught(lesson_spans(pool).await?);

    let upcoming = upcoming_lessons(pool, UPCOMING_LIMIT)
        .await?
        .iter()
        .map(DbUpcomingLesson::to_upcoming)
        .collect::<Result<Vec<_>>>()?;

    Ok(DashboardStats {
        lesson_count,
        student_count,
        hours_taught: hours,
        upcoming,
    })
}
