use serde::{Deserialize, Serialize};

use super::model::{ProgressStatus, ProgressSummary, ProgressView};

#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub problem_id: String,
    pub solution: Option<String>,
    pub status: Option<ProgressStatus>,
}

/// Partial update: omitted fields keep their stored value
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProgressRequest {
    pub solution: Option<String>,
    pub status: Option<ProgressStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteProgressRequest {
    pub solution: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: ProgressView,
}

#[derive(Debug, Serialize)]
pub struct ProgressMessageResponse {
    pub message: &'static str,
    pub progress: ProgressView,
}

#[derive(Debug, Serialize)]
pub struct ProgressListResponse {
    pub progress: Vec<ProgressSummary>,
}
