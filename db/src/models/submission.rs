use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::allowed_extension::extension_of;
use super::attachment::{self, AttachmentOwner, NewAttachment};
use super::timeline_item::TimelineItemKind;
use super::{assignment, course_role, timeline_item, user};

/// A student's attempt against one assignment. At most one live row per
/// `(assignment_id, student_id)`, enforced by a unique index; resubmission
/// updates the row in place.
///
/// `grade = 0` means ungraded; `feedback` is never null.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub grade: i64,
    pub feedback: String,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Restrict"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(has_many = "super::attachment::Entity")]
    Attachment,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Result of a submit call. The submission row always exists on success;
/// `rejected_extension` carries the first disallowed extension when some
/// attachments were refused.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub submission: Model,
    pub rejected_extension: Option<String>,
}

/// One row of a student's per-course progress view.
#[derive(Debug, Clone)]
pub struct StudentAssignmentStatus {
    pub timeline_item_id: i64,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub submission: Option<Model>,
    pub attachments: Vec<attachment::Model>,
}

impl Model {
    /// Submits (or resubmits) against the assignment behind `timeline_item_id`.
    ///
    /// The row is written with an atomic upsert keyed on
    /// `(assignment_id, student_id)`: a concurrent first-and-second submit
    /// cannot produce two rows. On conflict only `submitted_at` moves and
    /// `is_deleted` clears; an existing grade survives resubmission.
    ///
    /// Attachments are replaced wholesale and validated against the
    /// assignment's allow-list on every submit, first or repeat. A disallowed
    /// extension skips that attachment only; the submission row and the valid
    /// attachments persist, and the first offending extension is reported in
    /// the outcome.
    pub async fn submit(
        db: &DbConn,
        timeline_item_id: i64,
        student_id: i64,
        attachments: &[NewAttachment],
    ) -> Result<SubmitOutcome, DomainError> {
        let item = timeline_item::Model::find_active_of_kind(
            db,
            timeline_item_id,
            TimelineItemKind::Assignment,
        )
        .await?
        .ok_or(DomainError::NotFound("assignment"))?;

        let payload = assignment::Model::find_active_by_item(db, item.id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        if Utc::now() > payload.deadline {
            return Err(DomainError::DeadlinePassed);
        }

        let allowed = payload.allowed_extensions(db).await?;

        let txn = db.begin().await?;

        let row = ActiveModel {
            assignment_id: Set(payload.id),
            student_id: Set(student_id),
            submitted_at: Set(Utc::now()),
            grade: Set(0),
            feedback: Set(String::new()),
            is_deleted: Set(false),
            ..Default::default()
        };

        let submission = Entity::insert(row)
            .on_conflict(
                OnConflict::columns([Column::AssignmentId, Column::StudentId])
                    .update_columns([Column::SubmittedAt, Column::IsDeleted])
                    .to_owned(),
            )
            .exec_with_returning(&txn)
            .await?;

        let owner = AttachmentOwner::Submission(submission.id);
        attachment::Model::delete_for_owner(&txn, owner).await?;

        let mut rejected_extension = None;
        for info in attachments {
            let ext = extension_of(&info.file_name);
            if !allowed.is_empty() && !allowed.contains(&ext) {
                if rejected_extension.is_none() {
                    rejected_extension = Some(ext);
                }
                continue;
            }
            attachment::Model::insert_for_owner(&txn, owner, info).await?;
        }

        txn.commit().await?;

        Ok(SubmitOutcome {
            submission,
            rejected_extension,
        })
    }

    /// Records grade and feedback. The grader must hold the instructor role
    /// in the course the submission's assignment belongs to; authorship of
    /// the assignment is irrelevant here.
    pub async fn grade(
        db: &DbConn,
        submission_id: i64,
        instructor_id: i64,
        grade: i64,
        feedback: Option<String>,
    ) -> Result<Model, DomainError> {
        let submission = Self::find_active(db, submission_id)
            .await?
            .ok_or(DomainError::NotFound("submission"))?;

        let payload = assignment::Entity::find_by_id(submission.assignment_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;
        let item = timeline_item::Entity::find_by_id(payload.timeline_item_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("timeline item"))?;

        if !course_role::Model::is_instructor(db, item.course_id, instructor_id).await? {
            return Err(DomainError::Permission(
                "You don't have permission to grade this submission",
            ));
        }

        let updated = Entity::update_many()
            .col_expr(Column::Grade, Expr::value(grade))
            .col_expr(Column::Feedback, Expr::value(feedback.unwrap_or_default()))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::IsDeleted.eq(false))
            .exec(db)
            .await?;

        // Guard against a silent no-op write.
        if updated.rows_affected == 0 {
            return Err(DomainError::Db(DbErr::RecordNotUpdated));
        }

        Self::find_active(db, submission_id)
            .await?
            .ok_or(DomainError::NotFound("submission"))
    }

    pub async fn find_active(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(db)
            .await
    }

    pub async fn find_active_for_student(
        db: &DbConn,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsDeleted.eq(false))
            .one(db)
            .await
    }

    /// Instructor view: every live submission for the assignment behind
    /// `timeline_item_id`, with student identity and attachments.
    pub async fn list_for_assignment(
        db: &DbConn,
        timeline_item_id: i64,
    ) -> Result<Vec<(Model, Option<user::Model>, Vec<attachment::Model>)>, DomainError> {
        let payload = assignment::Model::find_active_by_item(db, timeline_item_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        let rows = Entity::find()
            .filter(Column::AssignmentId.eq(payload.id))
            .filter(Column::IsDeleted.eq(false))
            .order_by_asc(Column::Id)
            .find_also_related(user::Entity)
            .all(db)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (submission, student) in rows {
            let attachments = attachment::Model::list_for_owner(
                db,
                AttachmentOwner::Submission(submission.id),
            )
            .await?;
            out.push((submission, student, attachments));
        }
        Ok(out)
    }

    /// Student progress view: one entry per active assignment in the course,
    /// whether or not a submission exists.
    pub async fn student_course_overview(
        db: &DbConn,
        course_id: i64,
        student_id: i64,
    ) -> Result<Vec<StudentAssignmentStatus>, DomainError> {
        let items = timeline_item::Model::list_by_course_and_kind(
            db,
            course_id,
            TimelineItemKind::Assignment,
        )
        .await?;

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let Some(payload) = assignment::Model::find_active_by_item(db, item.id).await? else {
                continue;
            };

            let submission =
                Self::find_active_for_student(db, payload.id, student_id).await?;
            let attachments = match &submission {
                Some(s) => {
                    attachment::Model::list_for_owner(db, AttachmentOwner::Submission(s.id))
                        .await?
                }
                None => Vec::new(),
            };

            out.push(StudentAssignmentStatus {
                timeline_item_id: item.id,
                title: item.title,
                deadline: payload.deadline,
                submission,
                attachments,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::error::DomainError;
    use crate::models::attachment::NewAttachment;
    use crate::models::timeline_item::Model as TimelineItemModel;
    use crate::test_utils::{seed_course_with_members, setup_test_db};
    use chrono::{Duration, Utc};
    use sea_orm::DbConn;

    fn file(name: &str) -> NewAttachment {
        NewAttachment {
            file_name: name.to_owned(),
            file_path: format!("/store/{name}"),
            file_type: "application/pdf".to_owned(),
            file_size: 2048,
        }
    }

    async fn make_assignment(
        db: &DbConn,
        course_id: i64,
        instructor_id: i64,
        hours_from_now: i64,
        extensions: &[&str],
    ) -> i64 {
        let extensions: Vec<String> = extensions.iter().map(|s| s.to_string()).collect();
        TimelineItemModel::create_assignment(
            db,
            course_id,
            instructor_id,
            "Essay",
            "Write about borrow checking",
            Utc::now() + Duration::hours(hours_from_now),
            &extensions,
            &[],
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn resubmission_is_idempotent_by_key() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let item_id = make_assignment(&db, course_id, instructor_id, 1, &["pdf"]).await;

        let first = Model::submit(&db, item_id, student_id, &[file("essay.pdf")])
            .await
            .unwrap();
        assert!(first.rejected_extension.is_none());

        let second = Model::submit(&db, item_id, student_id, &[file("essay.pdf")])
            .await
            .unwrap();
        assert_eq!(first.submission.id, second.submission.id);

        let listed = Model::list_for_assignment(&db, item_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].2.len(), 1);
    }

    #[tokio::test]
    async fn past_deadline_creates_no_row() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let item_id = make_assignment(&db, course_id, instructor_id, -1, &["pdf"]).await;

        let err = Model::submit(&db, item_id, student_id, &[file("essay.pdf")])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DeadlinePassed));

        let listed = Model::list_for_assignment(&db, item_id).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn disallowed_extension_is_reported_but_submission_persists() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let item_id = make_assignment(&db, course_id, instructor_id, 1, &["pdf"]).await;

        let outcome = Model::submit(&db, item_id, student_id, &[file("essay.docx")])
            .await
            .unwrap();
        assert_eq!(outcome.rejected_extension.as_deref(), Some(".docx"));

        // Row exists, attachment does not.
        let listed = Model::list_for_assignment(&db, item_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].2.is_empty());
    }

    #[tokio::test]
    async fn empty_allow_list_admits_everything() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let item_id = make_assignment(&db, course_id, instructor_id, 1, &[]).await;

        let outcome = Model::submit(&db, item_id, student_id, &[file("anything.xyz")])
            .await
            .unwrap();
        assert!(outcome.rejected_extension.is_none());
    }

    #[tokio::test]
    async fn submit_against_missing_or_deleted_assignment_fails() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();

        let err = Model::submit(&db, 999, student_id, &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let item_id = make_assignment(&db, course_id, instructor_id, 1, &[]).await;
        TimelineItemModel::soft_delete(&db, item_id, instructor_id)
            .await
            .unwrap();
        let err = Model::submit(&db, item_id, student_id, &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn grading_round_trips_and_checks_course_membership() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let item_id = make_assignment(&db, course_id, instructor_id, 1, &["pdf"]).await;

        let outcome = Model::submit(&db, item_id, student_id, &[file("essay.pdf")])
            .await
            .unwrap();
        let submission_id = outcome.submission.id;

        // A student cannot grade.
        let err = Model::grade(&db, submission_id, student_id, 50, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Permission(_)));

        let graded = Model::grade(&db, submission_id, instructor_id, 85, Some("Good".into()))
            .await
            .unwrap();
        assert_eq!(graded.grade, 85);
        assert_eq!(graded.feedback, "Good");

        // Null feedback coerces to empty, and re-grading is allowed.
        let regraded = Model::grade(&db, submission_id, instructor_id, 90, None)
            .await
            .unwrap();
        assert_eq!(regraded.grade, 90);
        assert_eq!(regraded.feedback, "");
    }

    #[tokio::test]
    async fn resubmission_preserves_grade() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let item_id = make_assignment(&db, course_id, instructor_id, 1, &["pdf"]).await;

        let outcome = Model::submit(&db, item_id, student_id, &[file("v1.pdf")])
            .await
            .unwrap();
        Model::grade(&db, outcome.submission.id, instructor_id, 70, Some("Ok".into()))
            .await
            .unwrap();

        let again = Model::submit(&db, item_id, student_id, &[file("v2.pdf")])
            .await
            .unwrap();
        assert_eq!(again.submission.id, outcome.submission.id);

        let reread = Model::find_active(&db, outcome.submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reread.grade, 70);
        assert_eq!(reread.feedback, "Ok");
    }

    #[tokio::test]
    async fn overview_lists_every_assignment_with_or_without_submission() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();
        let submitted_item = make_assignment(&db, course_id, instructor_id, 1, &[]).await;
        let untouched_item = make_assignment(&db, course_id, instructor_id, 2, &[]).await;

        Model::submit(&db, submitted_item, student_id, &[file("essay.pdf")])
            .await
            .unwrap();

        let overview = Model::student_course_overview(&db, course_id, student_id)
            .await
            .unwrap();
        assert_eq!(overview.len(), 2);

        let submitted = overview
            .iter()
            .find(|s| s.timeline_item_id == submitted_item)
            .unwrap();
        assert!(submitted.submission.is_some());
        assert_eq!(submitted.attachments.len(), 1);

        let untouched = overview
            .iter()
            .find(|s| s.timeline_item_id == untouched_item)
            .unwrap();
        assert!(untouched.submission.is_none());
        assert!(untouched.attachments.is_empty());
    }
}
