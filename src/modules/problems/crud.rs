use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, MySql, Pool};
use uuid::Uuid;

use super::interface::ProblemRepository;
use super::model::{Difficulty, Hint, NewProblem, Problem, ProblemChanges, ProblemSummary};
use crate::error::AppResult;

#[derive(Debug, FromRow)]
struct ProblemRow {
    id: String,
    display_id: i64,
    title: String,
    difficulty: Difficulty,
    category: String,
    description: String,
    functional_requirements: Json<Vec<String>>,
    non_functional_requirements: Json<Vec<String>>,
    hints: Json<Vec<Hint>>,
    reference_solution: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProblemRow> for Problem {
    fn from(row: ProblemRow) -> Self {
        Self {
            id: row.id,
            display_id: row.display_id,
            title: row.title,
            difficulty: row.difficulty,
            category: row.category,
            description: row.description,
            functional_requirements: row.functional_requirements.0,
            non_functional_requirements: row.non_functional_requirements.0,
            hints: row.hints.0,
            reference_solution: row.reference_solution,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    id: String,
    display_id: i64,
    title: String,
    difficulty: Difficulty,
    category: String,
    description: String,
}

const PROBLEM_COLUMNS: &str = "id, display_id, title, difficulty, category, description, \
     functional_requirements, non_functional_requirements, hints, reference_solution, \
     created_at, updated_at";

/// MySQL-backed problem catalog
pub struct ProblemCrud {
    pool: Pool<MySql>,
}

impl ProblemCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProblemRepository for ProblemCrud {
    async fn create(&self, problem: NewProblem) -> AppResult<Problem> {
        let mut tx = self.pool.begin().await?;

        // Locks the scanned index range so concurrent creates queue up here;
        // anything that slips through hits the unique key on display_id.
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM problems FOR UPDATE")
            .fetch_one(&mut *tx)
            .await?;

        let now = Utc::now();
        let created = Problem {
            id: Uuid::new_v4().to_string(),
            display_id: count + 1,
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

        sqlx::query(&format!(
            "INSERT INTO problems ({PROBLEM_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&created.id)
        .bind(created.display_id)
        .bind(&created.title)
        .bind(created.difficulty)
        .bind(&created.category)
        .bind(&created.description)
        .bind(Json(&created.functional_requirements))
        .bind(Json(&created.non_functional_requirements))
        .bind(Json(&created.hints))
        .bind(&created.reference_solution)
        .bind(created.created_at)
        .bind(created.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Problem>> {
        let row = sqlx::query_as::<_, ProblemRow>(&format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Problem::from))
    }

    async fn list(&self) -> AppResult<Vec<ProblemSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT id, display_id, title, difficulty, category, description \
             FROM problems ORDER BY display_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProblemSummary {
                id: r.id,
                display_id: r.display_id,
                title: r.title,
                difficulty: r.difficulty,
                category: r.category,
                description: r.description,
            })
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM problems")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn update(&self, id: &str, changes: ProblemChanges) -> AppResult<Option<Problem>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProblemRow>(&format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = ? FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut problem = Problem::from(row);
        problem.apply(changes, Utc::now());

        sqlx::query(
            r#"
            UPDATE problems SET
                title = ?, difficulty = ?, category = ?, description = ?,
                functional_requirements = ?, non_functional_requirements = ?,
                hints = ?, reference_solution = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&problem.title)
        .bind(problem.difficulty)
        .bind(&problem.category)
        .bind(&problem.description)
        .bind(Json(&problem.functional_requirements))
        .bind(Json(&problem.non_functional_requirements))
        .bind(Json(&problem.hints))
        .bind(&problem.reference_solution)
        .bind(problem.updated_at)
        .bind(&problem.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(problem))
    }

    async fn delete(&self, id: &str) -> AppResult<Option<u64>> {
        let mut tx = self.pool.begin().await?;

        let display_id: Option<(i64,)> =
            sqlx::query_as("SELECT display_id FROM problems WHERE id = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((display_id,)) = display_id else {
            return Ok(None);
        };

        // user_progress rows go with the problem (ON DELETE CASCADE)
        sqlx::query("DELETE FROM problems WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Ascending order keeps the unique index on display_id satisfied row by row
        let shifted = sqlx::query(
            "UPDATE problems SET display_id = display_id - 1 \
             WHERE display_id > ? ORDER BY display_id ASC",
        )
        .bind(display_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(shifted.rows_affected()))
    }
}
