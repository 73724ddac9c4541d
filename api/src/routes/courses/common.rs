//! Response DTOs shared across the course-scoped route groups.

use chrono::{DateTime, Utc};
use db::models::attachment::Model as AttachmentModel;
use db::models::comment::CommentWithAuthor;
use db::models::timeline_item::{PayloadDetail, TimelineEntry, TimelineItemKind};
use db::models::user::Model as UserModel;
use serde::Serialize;

/// Returned by the create endpoints for both posts and assignments.
#[derive(Debug, Serialize)]
pub struct CreatedItemResponse {
    pub item_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub upload_date: DateTime<Utc>,
}

impl From<AttachmentModel> for AttachmentResponse {
    fn from(a: AttachmentModel) -> Self {
        Self {
            id: a.id,
            file_name: a.file_name,
            file_path: a.file_path,
            file_type: a.file_type,
            file_size: a.file_size,
            upload_date: a.upload_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<UserModel> for UserSummary {
    fn from(u: UserModel) -> Self {
        let name = u.full_name();
        Self {
            id: u.id,
            name,
            image_url: u.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub author: Option<UserSummary>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(c: CommentWithAuthor) -> Self {
        Self {
            id: c.comment.id,
            content: c.comment.content,
            posted_at: c.comment.posted_at,
            author: c.author.map(Into::into),
        }
    }
}

/// One fully composed timeline entry as rendered to clients. `deadline` and
/// `allowed_extensions` are present only for assignment items.
#[derive(Debug, Serialize)]
pub struct TimelineEntryResponse {
    pub id: i64,
    pub course_id: i64,
    pub author_id: i64,
    pub kind: TimelineItemKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<AttachmentResponse>,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}

impl From<TimelineEntry> for TimelineEntryResponse {
    fn from(entry: TimelineEntry) -> Self {
        let (deadline, allowed_extensions) = match entry.detail {
            Some(PayloadDetail::Assignment {
                deadline,
                allowed_extensions,
            }) => (Some(deadline), Some(allowed_extensions)),
            _ => (None, None),
        };

        Self {
            id: entry.item.id,
            course_id: entry.item.course_id,
            author_id: entry.item.author_id,
            kind: entry.item.kind,
            title: entry.item.title,
            body: entry.item.body,
            created_at: entry.item.created_at,
            attachments: entry.attachments.into_iter().map(Into::into).collect(),
            comments: entry.comments.into_iter().map(Into::into).collect(),
            deadline,
            allowed_extensions,
        }
    }
}
