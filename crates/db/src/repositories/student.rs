use crate::models::DbStudent;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_student(
    pool: &Pool<Postgres>,
    id: &str,
    name: &str,
    email: &str,
) -> Result<DbStudent> {
    tracing::debug!("Creating student: id={}, name={}", id, name);

    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        INSERT INTO students (id, name, email)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(student)
}

/// Adds a student to a tutor's roster. Linking twice is a no-op.
pub async fn link_student(pool: &Pool<Postgres>, tutor_id: &str, student_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tutor_students (tutor_id, student_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(tutor_id)
    .bind(student_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Every registered student, by name.
pub async fn list_students(pool: &Pool<Postgres>) -> Result<Vec<DbStudent>> {
    let students = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, name, email, created_at
        FROM students
        ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(students)
}

pub async fn count_students(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
