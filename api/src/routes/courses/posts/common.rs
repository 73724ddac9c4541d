//! Request DTO for creating or updating a post.

use db::models::attachment::NewAttachment;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
    /// When present, replaces the item's attachments wholesale.
    pub attachments: Option<Vec<NewAttachment>>,
}
