//! Data access layer.
//!
//! One repository per entity, owning all SQL for that table. Repositories are
//! cheap to construct and borrow the shared connection pool.

pub mod list_repository;
pub mod session_repository;
pub mod task_repository;
pub mod user_repository;

/// True when a repository error is the store refusing a duplicate value on a
/// UNIQUE column.
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}
