use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn progress_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(controller::list_progress).post(controller::save_progress),
        )
        .route(
            "/{problem_id}",
            get(controller::get_progress).put(controller::update_progress),
        )
        .route("/{problem_id}/complete", post(controller::complete_progress))
        .route("/{problem_id}/reset", post(controller::reset_progress))
}
