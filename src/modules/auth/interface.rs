use async_trait::async_trait;

use super::model::User;
use crate::error::AppResult;

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Identity store. Emails are unique; a duplicate insert is `AppError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list(&self) -> AppResult<Vec<User>>;
    async fn update_name(&self, id: &str, name: &str) -> AppResult<Option<User>>;
    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<()>;
    /// Returns false when no such user existed.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
