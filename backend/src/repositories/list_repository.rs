//! Database repository for task-list management operations.
//!
//! Every read and write is scoped to the owning user id, so a caller can
//! never observe or mutate another user's lists.

use crate::api::common::PaginationFilter;
use crate::database::models::List;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Repository for list database operations.
pub struct ListRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> ListRepository<'a> {
    /// Creates a new ListRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new list row.
    pub async fn insert_list(&self, list: &List) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO lists (id, user_id, title, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&list.id)
        .bind(&list.user_id)
        .bind(&list.title)
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a list by id, only if it belongs to the given user.
    pub async fn get_list_for_user(&self, list_id: &str, user_id: &str) -> Result<Option<List>> {
        let list = sqlx::query_as::<_, List>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM lists WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(list)
    }

    /// Retrieves the lists owned by a user, newest first.
    pub async fn get_lists_by_user(
        &self,
        user_id: &str,
        pagination: &PaginationFilter,
    ) -> Result<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM lists
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }

    /// Get total count of lists for a user
    pub async fn count_lists_by_user(&self, user_id: &str) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lists WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    /// Updates a list's title, only if it belongs to the given user.
    ///
    /// Returns the updated row, or `None` when no owned list matched.
    pub async fn update_list(
        &self,
        list_id: &str,
        user_id: &str,
        title: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<List>> {
        let list = sqlx::query_as::<_, List>(
            r#"
            UPDATE lists SET title = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(updated_at)
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(list)
    }

    /// Deletes a list, only if it belongs to the given user.
    ///
    /// Returns the removed row, or `None` when no owned list matched. Tasks
    /// under the list are the service layer's cleanup.
    pub async fn delete_list(&self, list_id: &str, user_id: &str) -> Result<Option<List>> {
        let list = sqlx::query_as::<_, List>(
            r#"
            DELETE FROM lists
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(list)
    }
}
