use crate::models::{DbSubject, DbTutor};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_tutor(
    pool: &Pool<Postgres>,
    id: &str,
    name: &str,
    email: &str,
    default_duration: i32,
) -> Result<DbTutor> {
    tracing::debug!("Creating tutor: id={}, name={}", id, name);

    let tutor = sqlx::query_as::<_, DbTutor>(
        r#"
        INSERT INTO tutors (id, name, email, default_duration)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, bio, price_per_hour, default_duration, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(default_duration)
    .fetch_one(pool)
    .await?;

    Ok(tutor)
}

pub async fn get_tutor_by_id(pool: &Pool<Postgres>, id: &str) -> Result<Option<DbTutor>> {
    tracing::debug!("Getting tutor by id: {}", id);

    let tutor = sqlx::query_as::<_, DbTutor>(
        r#"
        SELECT id, name, email, bio, price_per_hour, default_duration, created_at
        FROM tutors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(tutor)
}

/// First tutor, by sign-up order, whose name contains `fragment` ignoring case.
pub async fn find_tutor_by_name(pool: &Pool<Postgres>, fragment: &str) -> Result<Option<DbTutor>> {
    tracing::debug!("Finding tutor by name: {}", fragment);

    let tutor = sqlx::query_as::<_, DbTutor>(
        r#"
        SELECT id, name, email, bio, price_per_hour, default_duration, created_at
        FROM tutors
        WHERE position(lower($1) IN lower(name)) > 0
        ORDER BY created_at ASC, id ASC
        LIMIT 1
        "#,
    )
    .bind(fragment)
    .fetch_optional(pool)
    .await?;

    Ok(tutor)
}

pub async fn get_tutor_subjects(pool: &Pool<Postgres>, tutor_id: &str) -> Result<Vec<DbSubject>> {
    let subjects = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT s.id, s.name
        FROM subjects s
        JOIN tutor_subjects ts ON ts.subject_id = s.id
        WHERE ts.tutor_id = $1
        ORDER BY s.name ASC
        "#,
    )
    .bind(tutor_id)
    .fetch_all(pool)
    .await?;

    Ok(subjects)
}

/// Rewrites bio, price and the full subject list of a tutor in one transaction.
///
/// Subjects are matched by name and created when missing. Returns `None`, with
/// nothing written, when the tutor does not exist.
pub async fn update_tutor_profile(
    pool: &Pool<Postgres>,
    id: &str,
    bio: &str,
    price_per_hour: i32,
    subjects: &[String],
) -> Result<Option<DbTutor>> {
    tracing::debug!(
        "Updating tutor profile: id={}, price_per_hour={}, subjects={:?}",
        id, price_per_hour, subjects
    );

    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, DbTutor>(
        r#"
        UPDATE tutors
        SET bio = $2, price_per_hour = $3
        WHERE id = $1
        RETURNING id, name, email, bio, price_per_hour, default_duration, created_at
        "#,
    )
    .bind(id)
    .bind(bio)
    .bind(price_per_hour)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(tutor) = updated else {
        return Ok(None);
    };

    sqlx::query(
        r#"
        DELETE FROM tutor_subjects
        WHERE tutor_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    for name in subjects {
        // The no-op update makes RETURNING yield the id of an existing subject too.
        let subject_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO subjects (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name)
            DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO tutor_subjects (tutor_id, subject_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(id)
        .bind(subject_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!("Tutor profile updated: id={}", id);
    Ok(Some(tutor))
}
