use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::modules::grading::{
    policy::Verdict,
    schema::{CheckSolutionRequest, CheckSolutionResponse},
};
use crate::services::grader::GradingRequest;
use crate::services::session::ActiveUser;
use crate::AppState;

/// POST /grading/check
/// Grades the caller's solution against the problem's reference solution.
/// A top-tier match marks the problem completed with the graded text.
pub async fn check_solution(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Json(req): Json<CheckSolutionRequest>,
) -> AppResult<(StatusCode, Json<CheckSolutionResponse>)> {
    req.validate()?;
    AppError::check_id(&req.problem_id)?;

    let problem = state
        .repos
        .problems
        .find_by_id(&req.problem_id)
        .await?
        .ok_or(AppError::NotFound("Problem"))?;

    let started = Instant::now();
    let outcome = state
        .grader
        .evaluate(&GradingRequest::for_problem(&problem, &req.solution))
        .await;
    state
        .metrics
        .grading_duration_seconds
        .observe(started.elapsed().as_secs_f64());

    let result = outcome.map_err(|e| {
        state.metrics.grading_failures_total.inc();
        tracing::warn!("Grading failed for problem {}: {}", problem.id, e);
        AppError::GradingFailure(e.to_string())
    })?;

    let verdict = Verdict::from_percentage(result.match_percentage);
    state
        .metrics
        .gradings_total
        .with_label_values(&[verdict.as_str()])
        .inc();

    let progress = if verdict.marks_completed() {
        let view = state
            .ledger()
            .complete(&user.id, &problem.id, Some(req.solution))
            .await?;
        tracing::info!(
            "User {} completed problem #{} by grading ({}%)",
            user.id,
            problem.display_id,
            result.match_percentage
        );
        Some(view)
    } else {
        None
    };

    Ok((
        StatusCode::OK,
        Json(CheckSolutionResponse {
            match_percentage: result.match_percentage,
            message: verdict.message(result.match_percentage),
            feedback: result.feedback,
            verdict,
            progress,
        }),
    ))
}
