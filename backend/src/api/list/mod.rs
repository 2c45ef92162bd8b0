//! Module for task-list management API endpoints.
//!
//! This module handles functionalities related to a user's lists, such as
//! creating, renaming, and deleting them.

pub mod handlers;
pub mod models;
pub mod routes;
