//! Request and response DTOs for the submission workflow.

use chrono::{DateTime, Utc};
use db::models::attachment::NewAttachment;
use db::models::submission::{Model as SubmissionModel, StudentAssignmentStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::courses::common::{AttachmentResponse, UserSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    pub student_id: i64,
    #[serde(default)]
    pub attachments: Vec<NewAttachment>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    pub instructor_id: i64,
    #[validate(range(min = 0, message = "grade must not be negative"))]
    pub grade: i64,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub submission_id: i64,
}

/// Instructor view of one submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub student: Option<UserSummary>,
    pub submitted_at: DateTime<Utc>,
    pub grade: i64,
    pub feedback: String,
    pub attachments: Vec<AttachmentResponse>,
}

impl SubmissionResponse {
    pub fn from_parts(
        submission: SubmissionModel,
        student: Option<db::models::user::Model>,
        attachments: Vec<db::models::attachment::Model>,
    ) -> Self {
        Self {
            id: submission.id,
            student: student.map(Into::into),
            submitted_at: submission.submitted_at,
            grade: submission.grade,
            feedback: submission.feedback,
            attachments: attachments.into_iter().map(Into::into).collect(),
        }
    }
}

/// One row of a student's per-course progress view. Grade is 0 and feedback
/// empty while no submission exists.
#[derive(Debug, Serialize)]
pub struct StudentAssignmentStatusResponse {
    pub timeline_item_id: i64,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub submission_id: Option<i64>,
    pub grade: i64,
    pub feedback: String,
    pub attachments: Vec<AttachmentResponse>,
}

impl From<StudentAssignmentStatus> for StudentAssignmentStatusResponse {
    fn from(status: StudentAssignmentStatus) -> Self {
        let (submitted, submitted_at, submission_id, grade, feedback) = match &status.submission {
            Some(s) => (
                true,
                Some(s.submitted_at),
                Some(s.id),
                s.grade,
                s.feedback.clone(),
            ),
            None => (false, None, None, 0, String::new()),
        };

        Self {
            timeline_item_id: status.timeline_item_id,
            title: status.title,
            deadline: status.deadline,
            submitted,
            submitted_at,
            submission_id,
            grade,
            feedback,
            attachments: status.attachments.into_iter().map(Into::into).collect(),
        }
    }
}
