pub mod grader;
pub mod hashing;
pub mod jwt;
pub mod mailer;
pub mod metrics;
pub mod rate_limit;
pub mod security;
pub mod session;
pub mod verification;
