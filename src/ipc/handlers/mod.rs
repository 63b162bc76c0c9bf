pub mod auth;
pub mod core;
pub mod dashboard;
pub mod fees;
pub mod payments;
pub mod receipt;
pub mod reports;
pub mod students;
