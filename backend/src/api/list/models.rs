//! Request payloads for list endpoints.

use serde::Deserialize;
use validator::Validate;

/// List creation payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1-255 characters"
    ))]
    pub title: String,
}

/// List update payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1-255 characters"
    ))]
    pub title: String,
}
