use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::modules::problems::model::Difficulty;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for ProgressStatus {
    fn default() -> Self {
        ProgressStatus::NotStarted
    }
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// One row per (user_id, problem_id)
#[derive(Debug, Clone, FromRow)]
pub struct Progress {
    pub id: String,
    pub user_id: String,
    pub problem_id: String,
    pub status: ProgressStatus,
    pub solution: String,
    pub last_updated: DateTime<Utc>,
}

/// Fields to write; `None` keeps the stored value (or the default on insert)
#[derive(Debug, Clone, Default)]
pub struct ProgressChange {
    pub solution: Option<String>,
    pub status: Option<ProgressStatus>,
}

/// Progress joined with the problem it belongs to
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressSummary {
    pub problem_id: String,
    pub display_id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub status: ProgressStatus,
    pub last_updated: DateTime<Utc>,
}

/// What a user sees for one problem, whether or not a row exists yet
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: ProgressStatus,
    pub solution: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            id: None,
            status: ProgressStatus::NotStarted,
            solution: String::new(),
            last_updated: None,
        }
    }
}

impl From<Progress> for ProgressView {
    fn from(p: Progress) -> Self {
        Self {
            id: Some(p.id),
            status: p.status,
            solution: p.solution,
            last_updated: Some(p.last_updated),
        }
    }
}
