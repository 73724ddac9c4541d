//! Request DTO for creating or updating an assignment.

use chrono::{DateTime, Utc};
use db::models::attachment::NewAttachment;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AssignmentRequest {
    /// The authoring instructor. Must match the item's author on edit.
    pub instructor_id: i64,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
    /// RFC 3339 timestamp.
    pub deadline: DateTime<Utc>,
    /// When present, replaces the allow-list wholesale.
    pub allowed_extensions: Option<Vec<String>>,
    /// When present, replaces the item's attachments wholesale.
    pub attachments: Option<Vec<NewAttachment>>,
}
