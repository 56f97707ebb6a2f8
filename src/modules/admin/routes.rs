use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users",
        get(controller::list_users)
            .post(controller::create_user)
            .delete(controller::delete_user),
    )
}
