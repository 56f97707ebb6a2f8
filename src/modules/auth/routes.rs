use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(controller::signup))
        .route("/login", post(controller::login))
        .route("/logout", post(controller::logout))
        .route("/me", get(controller::get_me).put(controller::update_me))
        .route("/send-verification", post(controller::send_verification))
        .route("/verify-code", post(controller::verify_code))
        .route("/reset-password", put(controller::reset_password))
}
