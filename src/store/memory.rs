use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::modules::auth::{interface::UserRepository, model::User};
use crate::modules::problems::{
    interface::ProblemRepository,
    model::{NewProblem, Problem, ProblemChanges, ProblemSummary},
};
use crate::modules::progress::{
    interface::ProgressRepository,
    model::{Progress, ProgressChange, ProgressSummary},
};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    problems: HashMap<String, Problem>,
    progress: HashMap<(String, String), Progress>,
}

/// Process-local store for development and tests. Every operation holds one
/// lock, so renumbering and upserts are fully serialized. Nothing survives a
/// restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// USERS
// =============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User with this email already exists".into()));
        }

        tables.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.tables.read().await.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update_name(&self, id: &str, name: &str) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(id).map(|user| {
            user.name = name.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.get_mut(id) {
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(id).is_none() {
            return Ok(false);
        }
        tables.progress.retain(|(user_id, _), _| user_id != id);
        Ok(true)
    }
}

// =============================================================================
// PROBLEMS
// =============================================================================

#[async_trait]
impl ProblemRepository for MemoryStore {
    async fn create(&self, problem: NewProblem) -> AppResult<Problem> {
        let mut tables = self.tables.write().await;

        let now = Utc::now();
        let created = Problem {
            id: Uuid::new_v4().to_string(),
            display_id: tables.problems.len() as i64 + 1,
            title: problem.title,
            difficulty: problem.difficulty,
            category: problem.category,
            description: problem.description,
            functional_requirements: problem.functional_requirements,
            non_functional_requirements: problem.non_functional_requirements,
            hints: problem.hints,
            reference_solution: problem.reference_solution,
            created_at: now,
            updated_at: now,
        };

        tables.problems.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Problem>> {
        Ok(self.tables.read().await.problems.get(id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<ProblemSummary>> {
        let tables = self.tables.read().await;
        let mut summaries: Vec<ProblemSummary> =
            tables.problems.values().map(ProblemSummary::from).collect();
        summaries.sort_by_key(|p| p.display_id);
        Ok(summaries)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.problems.len() as u64)
    }

    async fn update(&self, id: &str, changes: ProblemChanges) -> AppResult<Option<Problem>> {
        let mut tables = self.tables.write().await;
        Ok(tables.problems.get_mut(id).map(|problem| {
            problem.apply(changes, Utc::now());
            problem.clone()
        }))
    }

    async fn delete(&self, id: &str) -> AppResult<Option<u64>> {
        let mut tables = self.tables.write().await;

        let Some(removed) = tables.problems.remove(id) else {
            return Ok(None);
        };

        tables.progress.retain(|(_, problem_id), _| problem_id != id);

        let mut shifted = 0;
        for problem in tables.problems.values_mut() {
            if problem.display_id > removed.display_id {
                problem.display_id -= 1;
                shifted += 1;
            }
        }

        Ok(Some(shifted))
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

#[async_trait]
impl ProgressRepository for MemoryStore {
    async fn find(&self, user_id: &str, problem_id: &str) -> AppResult<Option<Progress>> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .get(&(user_id.to_string(), problem_id.to_string()))
            .cloned())
    }

    async fn upsert(
        &self,
        user_id: &str,
        problem_id: &str,
        change: ProgressChange,
        now: DateTime<Utc>,
    ) -> AppResult<Progress> {
        let mut tables = self.tables.write().await;

        let progress = tables
            .progress
            .entry((user_id.to_string(), problem_id.to_string()))
            .or_insert_with(|| Progress {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                problem_id: problem_id.to_string(),
                status: Default::default(),
                solution: String::new(),
                last_updated: now,
            });

        if let Some(solution) = change.solution {
            progress.solution = solution;
        }
        if let Some(status) = change.status {
            progress.status = status;
        }
        progress.last_updated = now;

        Ok(progress.clone())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProgressSummary>> {
        let tables = self.tables.read().await;

        let mut rows: Vec<ProgressSummary> = tables
            .progress
            .values()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| {
                tables.problems.get(&p.problem_id).map(|problem| ProgressSummary {
                    problem_id: problem.id.clone(),
                    display_id: problem.display_id,
                    title: problem.title.clone(),
                    difficulty: problem.difficulty,
                    category: problem.category.clone(),
                    status: p.status,
                    last_updated: p.last_updated,
                })
            })
            .collect();

        rows.sort_by_key(|r| r.display_id);
        Ok(rows)
    }
}
