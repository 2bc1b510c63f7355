use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create tutors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tutors (
            id TEXT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            bio TEXT NULL,
            price_per_hour INTEGER NOT NULL DEFAULT 0,
            default_duration INTEGER NOT NULL DEFAULT 60,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_price CHECK (price_per_hour >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create subjects table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create tutor_subjects table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tutor_subjects (
            tutor_id TEXT NOT NULL REFERENCES tutors(id) ON DELETE CASCADE,
            subject_id UUID NOT NULL REFERENCES subjects(id),
            PRIMARY KEY (tutor_id, subject_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability table. Times are zero-padded HH:MM so text order is time order.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            tutor_id TEXT NOT NULL REFERENCES tutors(id) ON DELETE CASCADE,
            day VARCHAR(9) NOT NULL,
            start_time CHAR(5) NOT NULL,
            end_time CHAR(5) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day CHECK (day IN (
                'MONDAY', 'TUESDAY', 'WEDNESDAY', 'THURSDAY', 'FRIDAY', 'SATURDAY', 'SUNDAY'
            )),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create students table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id TEXT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create tutor_students table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tutor_students (
            tutor_id TEXT NOT NULL REFERENCES tutors(id) ON DELETE CASCADE,
            student_id TEXT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            PRIMARY KEY (tutor_id, student_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create lessons table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            tutor_id TEXT NOT NULL REFERENCES tutors(id) ON DELETE CASCADE,
            student_id TEXT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'PENDING',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('PENDING', 'CONFIRMED', 'CANCELLED')),
            CONSTRAINT valid_lesson_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availability_tutor_id ON availability(tutor_id);
        CREATE INDEX IF NOT EXISTS idx_tutor_subjects_subject_id ON tutor_subjects(subject_id);
        CREATE INDEX IF NOT EXISTS idx_tutor_students_student_id ON tutor_students(student_id);
        CREATE INDEX IF NOT EXISTS idx_lessons_start_time ON lessons(start_time);
        CREATE INDEX IF NOT EXISTS idx_lessons_tutor_id ON lessons(tutor_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
