use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn problem_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(controller::list_problems).post(controller::create_problem),
        )
        .route(
            "/{id}",
            get(controller::get_problem)
                .put(controller::update_problem)
                .delete(controller::delete_problem),
        )
}
