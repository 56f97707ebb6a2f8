use axum::{routing::post, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn grading_routes() -> Router<Arc<AppState>> {
    Router::new().route("/check", post(controller::check_solution))
}
