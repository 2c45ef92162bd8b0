//! Database repository for task management operations.
//!
//! Tasks are always addressed through their parent list; ownership of the
//! list is the service layer's check.

use crate::database::models::Task;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Repository for task database operations.
pub struct TaskRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> TaskRepository<'a> {
    /// Creates a new TaskRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new task row.
    pub async fn insert_task(&self, task: &Task) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, list_id, title, completed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.id)
        .bind(&task.list_id)
        .bind(&task.title)
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves all tasks in a list, oldest first.
    pub async fn get_tasks_by_list(&self, list_id: &str) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, list_id, title, completed, created_at, updated_at
            FROM tasks
            WHERE list_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }

    /// Retrieves a single task within a list.
    pub async fn get_task(&self, list_id: &str, task_id: &str) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, list_id, title, completed, created_at, updated_at
            FROM tasks WHERE id = ? AND list_id = ?
            "#,
        )
        .bind(task_id)
        .bind(list_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// `None` fields keep their current value. Returns the updated row, or
    /// `None` when no task matched.
    pub async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        title: Option<&str>,
        completed: Option<bool>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                title = COALESCE(?, title),
                completed = COALESCE(?, completed),
                updated_at = ?
            WHERE id = ? AND list_id = ?
            RETURNING id, list_id, title, completed, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(completed)
        .bind(updated_at)
        .bind(task_id)
        .bind(list_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task within a list.
    ///
    /// Returns the removed row, or `None` when no task matched.
    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = ? AND list_id = ?
            RETURNING id, list_id, title, completed, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(list_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Deletes every task in a list.
    pub async fn delete_tasks_by_list(&self, list_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE list_id = ?")
            .bind(list_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
