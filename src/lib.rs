pub mod config;
pub mod error;
pub mod modules;
pub mod services;
pub mod store;

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use modules::{
    admin::admin_routes, auth::auth_routes, grading::grading_routes, metrics::metrics_routes,
    problems::problem_routes, progress::{progress_routes, ProgressLedger},
};
use services::grader::Grader;
use services::jwt::JwtService;
use services::metrics::{metrics_middleware, MetricsRegistry};
use services::rate_limit::{GlobalRateLimiter, RateLimitLayer};
use services::security::security_headers;
use services::verification::VerificationService;
use store::Repositories;

const MAX_BODY_BYTES: usize = 256 * 1024;

pub struct AppState {
    pub repos: Repositories,
    pub verification: VerificationService,
    pub grader: Arc<dyn Grader>,
    pub jwt_service: JwtService,
    pub metrics: Arc<MetricsRegistry>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn ledger(&self) -> ProgressLedger {
        ProgressLedger::new(self.repos.progress.clone(), self.repos.problems.clone())
    }
}

pub fn create_app(state: Arc<AppState>, rate_limiter: GlobalRateLimiter) -> Router {
    Router::new()
        .merge(metrics_routes())
        .nest("/auth", auth_routes())
        .nest("/problems", problem_routes())
        .nest("/progress", progress_routes())
        .nest("/grading", grading_routes())
        .nest("/admin", admin_routes())
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            metrics_middleware,
        ))
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(RateLimitLayer::new(rate_limiter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
