use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::policy::Verdict;
use crate::modules::progress::model::ProgressView;

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Solution is required".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckSolutionRequest {
    pub problem_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub solution: String,
}

#[derive(Debug, Serialize)]
pub struct CheckSolutionResponse {
    pub match_percentage: f64,
    pub feedback: String,
    pub verdict: Verdict,
    pub message: String,
    /// Present only when the verdict marked the problem completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressView>,
}
