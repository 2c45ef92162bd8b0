//! List business logic service.
//!
//! All operations are scoped to the authenticated user; a list that exists
//! but belongs to someone else is indistinguishable from one that does not
//! exist.

use crate::api::common::PaginationFilter;
use crate::api::list::models::{CreateListRequest, UpdateListRequest};
use crate::database::models::List;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::list_repository::ListRepository;
use crate::repositories::task_repository::TaskRepository;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct ListService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> ListService<'a> {
    /// Creates a new ListService instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a list owned by the given user.
    pub async fn create_list(&self, user_id: &str, request: CreateListRequest) -> ServiceResult<List> {
        let now = Utc::now();
        let list = List {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            title: request.title,
            created_at: now,
            updated_at: now,
        };

        ListRepository::new(self.pool).insert_list(&list).await?;
        Ok(list)
    }

    /// Returns one page of the user's lists plus the total count.
    pub async fn get_lists(
        &self,
        user_id: &str,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<List>, u64)> {
        let repo = ListRepository::new(self.pool);
        let lists = repo.get_lists_by_user(user_id, pagination).await?;
        let total = repo.count_lists_by_user(user_id).await?;
        Ok((lists, total))
    }

    /// Updates a list's title.
    pub async fn update_list(
        &self,
        user_id: &str,
        list_id: &str,
        request: UpdateListRequest,
    ) -> ServiceResult<List> {
        ListRepository::new(self.pool)
            .update_list(list_id, user_id, &request.title, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::not_found("List", list_id))
    }

    /// Deletes a list and everything in it.
    ///
    /// Returns the removed list.
    pub async fn delete_list(&self, user_id: &str, list_id: &str) -> ServiceResult<List> {
        let list = ListRepository::new(self.pool)
            .delete_list(list_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("List", list_id))?;

        let removed = TaskRepository::new(self.pool)
            .delete_tasks_by_list(&list.id)
            .await?;
        if removed > 0 {
            tracing::debug!(list_id = %list.id, removed, "deleted tasks of removed list");
        }

        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_test_pool;
    use crate::database::models::CreateUser;
    use crate::repositories::user_repository::UserRepository;

    async fn seed_user(pool: &SqlitePool, email: &str) -> String {
        UserRepository::new(pool)
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                email: email.to_string(),
                password_hash: "$2b$12$fakedhashfortestingonly".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn lists_are_invisible_across_users() {
        let pool = connect_test_pool().await;
        let service = ListService::new(&pool);
        let owner = seed_user(&pool, "owner@x.com").await;
        let other = seed_user(&pool, "other@x.com").await;

        let list = service
            .create_list(
                &owner,
                CreateListRequest {
                    title: "groceries".to_string(),
                },
            )
            .await
            .unwrap();

        let (owner_lists, owner_total) = service
            .get_lists(&owner, &PaginationFilter::default())
            .await
            .unwrap();
        assert_eq!(owner_total, 1);
        assert_eq!(owner_lists[0].id, list.id);

        let (other_lists, other_total) = service
            .get_lists(&other, &PaginationFilter::default())
            .await
            .unwrap();
        assert_eq!(other_total, 0);
        assert!(other_lists.is_empty());

        // Mutating someone else's list reads as "no such list".
        let err = service
            .update_list(
                &other,
                &list.id,
                UpdateListRequest {
                    title: "hijacked".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_changes_title_in_place() {
        let pool = connect_test_pool().await;
        let service = ListService::new(&pool);
        let owner = seed_user(&pool, "owner@x.com").await;

        let list = service
            .create_list(
                &owner,
                CreateListRequest {
                    title: "errands".to_string(),
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_list(
                &owner,
                &list.id,
                UpdateListRequest {
                    title: "weekend errands".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, list.id);
        assert_eq!(updated.title, "weekend errands");
    }

    #[tokio::test]
    async fn delete_removes_the_list() {
        let pool = connect_test_pool().await;
        let service = ListService::new(&pool);
        let owner = seed_user(&pool, "owner@x.com").await;

        let list = service
            .create_list(
                &owner,
                CreateListRequest {
                    title: "to remove".to_string(),
                },
            )
            .await
            .unwrap();

        let removed = service.delete_list(&owner, &list.id).await.unwrap();
        assert_eq!(removed.id, list.id);

        let (lists, total) = service
            .get_lists(&owner, &PaginationFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 0);
        assert!(lists.is_empty());

        let err = service.delete_list(&owner, &list.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
