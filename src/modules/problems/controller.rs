use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::modules::problems::{
    model::Problem,
    schema::{
        CreateProblemRequest, DeleteProblemResponse, ProblemListItem, ProblemListResponse,
        UpdateProblemRequest,
    },
};
use crate::modules::progress::model::ProgressStatus;
use crate::services::session::{AdminUser, MaybeAuthUser};
use crate::AppState;

/// GET /problems
/// Signed-in callers also get their attempted/completed flags per problem.
pub async fn list_problems(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(caller): MaybeAuthUser,
) -> AppResult<(StatusCode, Json<ProblemListResponse>)> {
    let summaries = state.repos.problems.list().await?;
    state.metrics.catalog_size.set(summaries.len() as f64);

    let statuses: HashMap<String, ProgressStatus> = match &caller {
        Some(user) => state
            .ledger()
            .list_for_user(&user.id)
            .await?
            .into_iter()
            .map(|p| (p.problem_id, p.status))
            .collect(),
        None => HashMap::new(),
    };

    let problems = summaries
        .into_iter()
        .map(|summary| {
            let status = statuses.get(&summary.id).copied().unwrap_or_default();
            ProblemListItem {
                summary,
                attempted: status != ProgressStatus::NotStarted,
                completed: status == ProgressStatus::Completed,
            }
        })
        .collect();

    Ok((StatusCode::OK, Json(ProblemListResponse { problems })))
}

/// GET /problems/{id}
pub async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<Problem>)> {
    AppError::check_id(&id)?;

    let problem = state
        .repos
        .problems
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound("Problem"))?;

    Ok((StatusCode::OK, Json(problem)))
}

async fn refresh_catalog_size(state: &AppState) -> AppResult<()> {
    let count = state.repos.problems.count().await?;
    state.metrics.catalog_size.set(count as f64);
    Ok(())
}

/// POST /problems (admin)
pub async fn create_problem(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<Problem>)> {
    req.validate()?;

    let problem = state.repos.problems.create(req.into()).await?;
    refresh_catalog_size(&state).await?;

    tracing::info!(
        "Problem #{} '{}' created by {}",
        problem.display_id,
        problem.title,
        admin.email
    );

    Ok((StatusCode::CREATED, Json(problem)))
}

/// PUT /problems/{id} (admin)
pub async fn update_problem(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateProblemRequest>,
) -> AppResult<(StatusCode, Json<Problem>)> {
    AppError::check_id(&id)?;
    req.validate()?;

    let problem = state
        .repos
        .problems
        .update(&id, req.into())
        .await?
        .ok_or(AppError::NotFound("Problem"))?;

    tracing::info!("Problem #{} '{}' updated", problem.display_id, problem.title);

    Ok((StatusCode::OK, Json(problem)))
}

/// DELETE /problems/{id} (admin)
/// Later problems move up one display position.
pub async fn delete_problem(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<DeleteProblemResponse>)> {
    AppError::check_id(&id)?;

    let renumbered = state
        .repos
        .problems
        .delete(&id)
        .await?
        .ok_or(AppError::NotFound("Problem"))?;

    state.metrics.problems_renumbered_total.inc_by(renumbered as f64);
    refresh_catalog_size(&state).await?;

    tracing::info!(
        "Problem {} deleted by {}; {} problems renumbered",
        id,
        admin.email,
        renumbered
    );

    Ok((
        StatusCode::OK,
        Json(DeleteProblemResponse {
            success: true,
            renumbered,
        }),
    ))
}
