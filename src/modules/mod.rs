pub mod admin;
pub mod auth;
pub mod grading;
pub mod metrics;
pub mod problems;
pub mod progress;
