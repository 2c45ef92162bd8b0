//! Task business logic service.
//!
//! Every operation first resolves the parent list under the authenticated
//! user's id; a list the caller does not own is a `NotFound`, exactly like a
//! list that is absent.

use crate::api::task::models::{CreateTaskRequest, UpdateTaskRequest};
use crate::database::models::Task;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::list_repository::ListRepository;
use crate::repositories::task_repository::TaskRepository;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct TaskService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> TaskService<'a> {
    /// Creates a new TaskService instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a task in one of the user's lists.
    pub async fn create_task(
        &self,
        user_id: &str,
        list_id: &str,
        request: CreateTaskRequest,
    ) -> ServiceResult<Task> {
        self.require_owned_list(user_id, list_id).await?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::now_v7().to_string(),
            list_id: list_id.to_string(),
            title: request.title,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        TaskRepository::new(self.pool).insert_task(&task).await?;
        Ok(task)
    }

    /// Returns all tasks in one of the user's lists.
    pub async fn get_tasks(&self, user_id: &str, list_id: &str) -> ServiceResult<Vec<Task>> {
        self.require_owned_list(user_id, list_id).await?;
        Ok(TaskRepository::new(self.pool)
            .get_tasks_by_list(list_id)
            .await?)
    }

    /// Returns a single task in one of the user's lists.
    pub async fn get_task(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
    ) -> ServiceResult<Task> {
        self.require_owned_list(user_id, list_id).await?;
        TaskRepository::new(self.pool)
            .get_task(list_id, task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", task_id))
    }

    /// Applies a partial update to a task.
    pub async fn update_task(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
        request: UpdateTaskRequest,
    ) -> ServiceResult<Task> {
        self.require_owned_list(user_id, list_id).await?;
        TaskRepository::new(self.pool)
            .update_task(
                list_id,
                task_id,
                request.title.as_deref(),
                request.completed,
                Utc::now(),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", task_id))
    }

    /// Deletes a task. Returns the removed row.
    pub async fn delete_task(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
    ) -> ServiceResult<Task> {
        self.require_owned_list(user_id, list_id).await?;
        TaskRepository::new(self.pool)
            .delete_task(list_id, task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", task_id))
    }

    async fn require_owned_list(&self, user_id: &str, list_id: &str) -> ServiceResult<()> {
        ListRepository::new(self.pool)
            .get_list_for_user(list_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("List", list_id))?;
        Ok(())
    }
}
