use sqlx::PgPool;

use crate::error::AppError;
use crate::models::task::{Task, TaskFilter};

/// Persistent task records.
///
/// The task list is shared by all authenticated users; there is no ownership
/// column. Every operation is a single SQL statement, so each create, update
/// or delete is individually atomic.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists tasks matching `filter`, most recently created first.
    pub async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        let sql = match filter {
            TaskFilter::All => {
                "SELECT id, title, completed, created_at, updated_at
                 FROM tasks ORDER BY created_at DESC"
            }
            TaskFilter::Pending => {
                "SELECT id, title, completed, created_at, updated_at
                 FROM tasks WHERE completed = FALSE ORDER BY created_at DESC"
            }
            TaskFilter::Completed => {
                "SELECT id, title, completed, created_at, updated_at
                 FROM tasks WHERE completed = TRUE ORDER BY created_at DESC"
            }
        };

        let tasks = sqlx::query_as::<_, Task>(sql).fetch_all(&self.pool).await?;

        Ok(tasks)
    }

    /// Inserts a new task with `completed = false` and store-assigned
    /// timestamps.
    pub async fn create(&self, title: &str) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title) VALUES ($1)
             RETURNING id, title, completed, created_at, updated_at",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// Fields passed as `None` keep their current value; `updated_at` is
    /// refreshed whenever the statement succeeds. An empty title is rejected
    /// before the statement runs; emptiness is an update-time rule, create
    /// has its own payload validation.
    pub async fn update(
        &self,
        id: i32,
        title: Option<String>,
        completed: Option<bool>,
    ) -> Result<Task, AppError> {
        if let Some(title) = &title {
            if title.is_empty() {
                return Err(AppError::ValidationError("Title cannot be empty".into()));
            }
        }

        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = COALESCE($2, title),
                 completed = COALESCE($3, completed),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING id, title, completed, created_at, updated_at",
        )
        .bind(id)
        .bind(title)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }

        Ok(())
    }

    /// Deletes every completed task and returns how many were removed.
    pub async fn delete_completed(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE completed = TRUE")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes every task and returns how many were removed.
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks").execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}
