//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between different parts of the application,
//! such as managing user sessions or list/task ownership.

pub mod list_service;
pub mod session_service;
pub mod task_service;
pub mod user_service;
