pub mod availability;
pub mod lesson;
pub mod student;
pub mod tutor;
