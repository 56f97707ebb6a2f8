pub mod controller;
pub mod crud;
pub mod interface;
pub mod ledger;
pub mod model;
pub mod routes;
pub mod schema;

pub use ledger::ProgressLedger;
pub use routes::progress_routes;
