//! Request DTO for creating or updating a comment.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}
