use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool};
use uuid::Uuid;

use super::interface::ProgressRepository;
use super::model::{Progress, ProgressChange, ProgressSummary};
use crate::error::AppResult;

/// MySQL-backed progress ledger
pub struct ProgressCrud {
    pool: Pool<MySql>,
}

impl ProgressCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for ProgressCrud {
    async fn find(&self, user_id: &str, problem_id: &str) -> AppResult<Option<Progress>> {
        let progress = sqlx::query_as::<_, Progress>(
            "SELECT id, user_id, problem_id, status, solution, last_updated \
             FROM user_progress WHERE user_id = ? AND problem_id = ?",
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    async fn upsert(
        &self,
        user_id: &str,
        problem_id: &str,
        change: ProgressChange,
        now: DateTime<Utc>,
    ) -> AppResult<Progress> {
        let mut tx = self.pool.begin().await?;

        // Single statement against the unique (user_id, problem_id) key;
        // COALESCE keeps columns the caller left out.
        sqlx::query(
            r#"
            INSERT INTO user_progress (id, user_id, problem_id, status, solution, last_updated)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                status = COALESCE(?, status),
                solution = COALESCE(?, solution),
                last_updated = VALUES(last_updated)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(problem_id)
        .bind(change.status.unwrap_or_default())
        .bind(change.solution.clone().unwrap_or_default())
        .bind(now)
        .bind(change.status)
        .bind(change.solution)
        .execute(&mut *tx)
        .await?;

        let progress = sqlx::query_as::<_, Progress>(
            "SELECT id, user_id, problem_id, status, solution, last_updated \
             FROM user_progress WHERE user_id = ? AND problem_id = ?",
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(progress)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProgressSummary>> {
        let rows = sqlx::query_as::<_, ProgressSummary>(
            r#"
            SELECT p.id AS problem_id, p.display_id, p.title, p.difficulty, p.category,
                   up.status, up.last_updated
            FROM user_progress up
            JOIN problems p ON p.id = up.problem_id
            WHERE up.user_id = ?
            ORDER BY p.display_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

