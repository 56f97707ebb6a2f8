pub mod controller;
pub mod policy;
pub mod routes;
pub mod schema;

pub use routes::grading_routes;
