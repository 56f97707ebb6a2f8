use serde::Serialize;

pub const COMPLETION_THRESHOLD: f64 = 95.0;
pub const GOOD_THRESHOLD: f64 = 80.0;
pub const PARTIAL_THRESHOLD: f64 = 50.0;

/// How a graded solution is treated. Only `Completed` changes stored progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Completed,
    Good,
    Partial,
    Insufficient,
}

impl Verdict {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= COMPLETION_THRESHOLD {
            Self::Completed
        } else if percentage >= GOOD_THRESHOLD {
            Self::Good
        } else if percentage >= PARTIAL_THRESHOLD {
            Self::Partial
        } else {
            Self::Insufficient
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Good => "good",
            Self::Partial => "partial",
            Self::Insufficient => "insufficient",
        }
    }

    pub fn marks_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn message(&self, percentage: f64) -> String {
        match self {
            Self::Completed => format!(
                "Congratulations! Your solution matches the reference solution by {}%. This problem is now marked as completed!",
                percentage
            ),
            Self::Good => format!(
                "Congratulations! Your solution matches the reference solution by {}%. See what you can improve on!",
                percentage
            ),
            Self::Partial => format!(
                "Your solution matches the reference solution by {}%. See what you missed!",
                percentage
            ),
            Self::Insufficient => format!(
                "Your solution only matches the reference solution by {}%. Practice more to improve!",
                percentage
            ),
        }
    }
}
