use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hint {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// A catalog entry. `display_id` is the gapless 1-based position shown to users;
/// `id` never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub display_id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub description: String,
    pub functional_requirements: Vec<String>,
    pub non_functional_requirements: Vec<String>,
    pub hints: Vec<Hint>,
    pub reference_solution: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by an admin when creating a problem
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub description: String,
    pub functional_requirements: Vec<String>,
    pub non_functional_requirements: Vec<String>,
    pub hints: Vec<Hint>,
    pub reference_solution: String,
}

/// Partial update; `None` leaves the stored value alone
#[derive(Debug, Clone, Default)]
pub struct ProblemChanges {
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub functional_requirements: Option<Vec<String>>,
    pub non_functional_requirements: Option<Vec<String>>,
    pub hints: Option<Vec<Hint>>,
    pub reference_solution: Option<String>,
}

impl Problem {
    pub fn apply(&mut self, changes: ProblemChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(difficulty) = changes.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(reqs) = changes.functional_requirements {
            self.functional_requirements = reqs;
        }
        if let Some(reqs) = changes.non_functional_requirements {
            self.non_functional_requirements = reqs;
        }
        if let Some(hints) = changes.hints {
            self.hints = hints;
        }
        if let Some(solution) = changes.reference_solution {
            self.reference_solution = solution;
        }
        self.updated_at = now;
    }
}

/// Listing view without the heavy text fields
#[derive(Debug, Clone, Serialize)]
pub struct ProblemSummary {
    pub id: String,
    pub display_id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub description: String,
}

impl From<&Problem> for ProblemSummary {
    fn from(p: &Problem) -> Self {
        Self {
            id: p.id.clone(),
            display_id: p.display_id,
            title: p.title.clone(),
            difficulty: p.difficulty,
            category: p.category.clone(),
            description: p.description.clone(),
        }
    }
}
