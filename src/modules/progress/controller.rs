use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::AppResult;
use crate::modules::progress::{
    model::{ProgressChange, ProgressView},
    schema::{
        CompleteProgressRequest, ProgressListResponse, ProgressMessageResponse, ProgressResponse,
        SaveProgressRequest, UpdateProgressRequest,
    },
};
use crate::services::session::ActiveUser;
use crate::AppState;

fn record_write(state: &AppState, progress: &ProgressView) {
    state
        .metrics
        .progress_writes_total
        .with_label_values(&[progress.status.as_str()])
        .inc();
}

/// GET /progress
pub async fn list_progress(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
) -> AppResult<(StatusCode, Json<ProgressListResponse>)> {
    let progress = state.ledger().list_for_user(&user.id).await?;
    Ok((StatusCode::OK, Json(ProgressListResponse { progress })))
}

/// POST /progress
/// Workspace save; defaults to in_progress.
pub async fn save_progress(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Json(req): Json<SaveProgressRequest>,
) -> AppResult<(StatusCode, Json<ProgressMessageResponse>)> {
    let progress = state
        .ledger()
        .save(&user.id, &req.problem_id, req.solution, req.status)
        .await?;
    record_write(&state, &progress);

    Ok((
        StatusCode::OK,
        Json(ProgressMessageResponse {
            message: "Progress saved successfully",
            progress,
        }),
    ))
}

/// GET /progress/{problem_id}
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(problem_id): Path<String>,
) -> AppResult<(StatusCode, Json<ProgressResponse>)> {
    let progress = state.ledger().get(&user.id, &problem_id).await?;
    Ok((StatusCode::OK, Json(ProgressResponse { progress })))
}

/// PUT /progress/{problem_id}
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(problem_id): Path<String>,
    Json(req): Json<UpdateProgressRequest>,
) -> AppResult<(StatusCode, Json<ProgressMessageResponse>)> {
    let change = ProgressChange {
        solution: req.solution,
        status: req.status,
    };
    let progress = state.ledger().upsert(&user.id, &problem_id, change).await?;
    record_write(&state, &progress);

    Ok((
        StatusCode::OK,
        Json(ProgressMessageResponse {
            message: "Progress updated successfully",
            progress,
        }),
    ))
}

/// POST /progress/{problem_id}/complete
pub async fn complete_progress(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(problem_id): Path<String>,
    body: Option<Json<CompleteProgressRequest>>,
) -> AppResult<(StatusCode, Json<ProgressMessageResponse>)> {
    let Json(req) = body.unwrap_or_default();
    let progress = state
        .ledger()
        .complete(&user.id, &problem_id, req.solution)
        .await?;
    record_write(&state, &progress);

    tracing::info!("User {} completed problem {}", user.id, problem_id);

    Ok((
        StatusCode::OK,
        Json(ProgressMessageResponse {
            message: "Problem marked as completed",
            progress,
        }),
    ))
}

/// POST /progress/{problem_id}/reset
pub async fn reset_progress(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(problem_id): Path<String>,
) -> AppResult<(StatusCode, Json<ProgressMessageResponse>)> {
    let progress = state.ledger().reset(&user.id, &problem_id).await?;
    record_write(&state, &progress);

    Ok((
        StatusCode::OK,
        Json(ProgressMessageResponse {
            message: "Progress reset successfully",
            progress,
        }),
    ))
}
