/// Availability read and wipe-and-rewrite save
pub mod availability;
/// Dashboard totals and the student roster
pub mod dashboard;
/// Lesson booking
pub mod lesson;
/// Tutor profile read and update
pub mod tutor;
