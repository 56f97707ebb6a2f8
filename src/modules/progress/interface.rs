use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Progress, ProgressChange, ProgressSummary};
use crate::error::AppResult;

/// Progress ledger storage.
///
/// `upsert` is atomic per (user, problem) pair. Concurrent writers race
/// last-write-wins; there is no version check.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find(&self, user_id: &str, problem_id: &str) -> AppResult<Option<Progress>>;
    async fn upsert(
        &self,
        user_id: &str,
        problem_id: &str,
        change: ProgressChange,
        now: DateTime<Utc>,
    ) -> AppResult<Progress>;
    /// Ordered by the problem's `display_id`
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProgressSummary>>;
}
