pub mod availability;
pub mod dashboard;
pub mod health;
pub mod lesson;
pub mod tutor;
