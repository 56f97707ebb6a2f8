use chrono::Utc;
use std::sync::Arc;

use super::interface::ProgressRepository;
use super::model::{ProgressChange, ProgressStatus, ProgressSummary, ProgressView};
use crate::error::{AppError, AppResult};
use crate::modules::problems::interface::ProblemRepository;

/// Per-user progress operations on top of the raw repository.
///
/// Identifiers are checked before any store access. Status transitions are
/// whatever the caller asks for.
pub struct ProgressLedger {
    progress: Arc<dyn ProgressRepository>,
    problems: Arc<dyn ProblemRepository>,
}

impl ProgressLedger {
    pub fn new(progress: Arc<dyn ProgressRepository>, problems: Arc<dyn ProblemRepository>) -> Self {
        Self { progress, problems }
    }

    /// Stored progress, or the not-started default. Never creates a row.
    pub async fn get(&self, user_id: &str, problem_id: &str) -> AppResult<ProgressView> {
        AppError::check_id(user_id)?;
        AppError::check_id(problem_id)?;

        let progress = self.progress.find(user_id, problem_id).await?;
        Ok(progress.map(ProgressView::from).unwrap_or_default())
    }

    /// Create or update the pair's record; omitted fields are kept.
    pub async fn upsert(
        &self,
        user_id: &str,
        problem_id: &str,
        change: ProgressChange,
    ) -> AppResult<ProgressView> {
        AppError::check_id(user_id)?;
        AppError::check_id(problem_id)?;

        if self.problems.find_by_id(problem_id).await?.is_none() {
            return Err(AppError::NotFound("Problem"));
        }

        let progress = self
            .progress
            .upsert(user_id, problem_id, change, Utc::now())
            .await?;

        tracing::debug!(
            "Progress for user {} on problem {} is now {}",
            user_id,
            problem_id,
            progress.status.as_str()
        );

        Ok(progress.into())
    }

    /// Workspace save: missing solution becomes "", missing status becomes in_progress.
    pub async fn save(
        &self,
        user_id: &str,
        problem_id: &str,
        solution: Option<String>,
        status: Option<ProgressStatus>,
    ) -> AppResult<ProgressView> {
        let change = ProgressChange {
            solution: Some(solution.unwrap_or_default()),
            status: Some(status.unwrap_or(ProgressStatus::InProgress)),
        };
        self.upsert(user_id, problem_id, change).await
    }

    pub async fn complete(
        &self,
        user_id: &str,
        problem_id: &str,
        solution: Option<String>,
    ) -> AppResult<ProgressView> {
        let change = ProgressChange {
            solution,
            status: Some(ProgressStatus::Completed),
        };
        self.upsert(user_id, problem_id, change).await
    }

    pub async fn reset(&self, user_id: &str, problem_id: &str) -> AppResult<ProgressView> {
        let change = ProgressChange {
            solution: Some(String::new()),
            status: Some(ProgressStatus::NotStarted),
        };
        self.upsert(user_id, problem_id, change).await
    }

    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProgressSummary>> {
        AppError::check_id(user_id)?;
        self.progress.list_for_user(user_id).await
    }
}
