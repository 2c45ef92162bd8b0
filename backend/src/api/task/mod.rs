//! Module for task management API endpoints.
//!
//! Tasks live inside lists; these endpoints are always reached through a
//! parent list id.

pub mod handlers;
pub mod models;
pub mod routes;
