//! Request payloads for task endpoints.

use serde::Deserialize;
use validator::Validate;

/// Task creation payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1-255 characters"
    ))]
    pub title: String,
}

/// Task update payload; absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1-255 characters"
    ))]
    pub title: Option<String>,

    pub completed: Option<bool>,
}
