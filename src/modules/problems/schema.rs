use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::model::{Difficulty, Hint, NewProblem, ProblemChanges, ProblemSummary};

fn validate_hints(hints: &Vec<Hint>) -> Result<(), ValidationError> {
    let malformed = hints.iter().any(|hint| {
        hint.id.trim().is_empty() || hint.title.trim().is_empty() || hint.content.trim().is_empty()
    });

    if malformed {
        return Err(ValidationError::new("hints").with_message(
            "Invalid hints format. Each hint must have id, title, and content.".into(),
        ));
    }
    Ok(())
}

fn validate_requirements(reqs: &Vec<String>) -> Result<(), ValidationError> {
    if reqs.is_empty() || reqs.iter().any(|r| r.trim().is_empty()) {
        return Err(ValidationError::new("requirements")
            .with_message("Requirements must be a non-empty list of non-empty strings".into()));
    }
    Ok(())
}

// =============================================================================
// CREATE / UPDATE
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub difficulty: Difficulty,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(custom(function = "validate_requirements"))]
    pub functional_requirements: Vec<String>,
    #[validate(custom(function = "validate_requirements"))]
    pub non_functional_requirements: Vec<String>,
    #[validate(custom(function = "validate_hints"))]
    pub hints: Vec<Hint>,
    #[validate(length(min = 1, message = "reference_solution is required"))]
    pub reference_solution: String,
}

impl From<CreateProblemRequest> for NewProblem {
    fn from(req: CreateProblemRequest) -> Self {
        Self {
            title: req.title,
            difficulty: req.difficulty,
            category: req.category,
            description: req.description,
            functional_requirements: req.functional_requirements,
            non_functional_requirements: req.non_functional_requirements,
            hints: req.hints,
            reference_solution: req.reference_solution,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_requirements"))]
    pub functional_requirements: Option<Vec<String>>,
    #[validate(custom(function = "validate_requirements"))]
    pub non_functional_requirements: Option<Vec<String>>,
    #[validate(custom(function = "validate_hints"))]
    pub hints: Option<Vec<Hint>>,
    #[validate(length(min = 1, message = "reference_solution must not be empty"))]
    pub reference_solution: Option<String>,
}

impl From<UpdateProblemRequest> for ProblemChanges {
    fn from(req: UpdateProblemRequest) -> Self {
        Self {
            title: req.title,
            difficulty: req.difficulty,
            category: req.category,
            description: req.description,
            functional_requirements: req.functional_requirements,
            non_functional_requirements: req.non_functional_requirements,
            hints: req.hints,
            reference_solution: req.reference_solution,
        }
    }
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProblemListItem {
    #[serde(flatten)]
    pub summary: ProblemSummary,
    pub attempted: bool,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ProblemListResponse {
    pub problems: Vec<ProblemListItem>,
}

#[derive(Debug, Serialize)]
pub struct DeleteProblemResponse {
    pub success: bool,
    pub renumbered: u64,
}
