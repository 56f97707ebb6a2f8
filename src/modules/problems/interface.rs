use async_trait::async_trait;

use super::model::{NewProblem, Problem, ProblemChanges, ProblemSummary};
use crate::error::AppResult;

/// Problem catalog.
///
/// Implementations keep `display_id` unique and contiguous from 1:
/// `create` assigns `count + 1` and `delete` shifts every later problem
/// down by one. Both must be serialized against each other.
#[async_trait]
pub trait ProblemRepository: Send + Sync {
    async fn create(&self, problem: NewProblem) -> AppResult<Problem>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Problem>>;
    /// Ordered by `display_id`
    async fn list(&self) -> AppResult<Vec<ProblemSummary>>;
    async fn count(&self) -> AppResult<u64>;
    async fn update(&self, id: &str, changes: ProblemChanges) -> AppResult<Option<Problem>>;
    /// Removes the problem and its progress rows. Returns how many problems
    /// were renumbered, or `None` if the id is unknown.
    async fn delete(&self, id: &str) -> AppResult<Option<u64>>;
}
