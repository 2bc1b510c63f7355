//! # Tutorly Core
//!
//! Domain types shared by the database and API crates: weekly availability
//! slots, tutor profiles, lessons and students, the error taxonomy, and the schedule editor that
//! validates a week before it is persisted.

pub mod editor;
pub mod errors;
pub mod models;
pub mod persister;
