use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::attachment::{self, AttachmentOwner, NewAttachment};
use super::comment::CommentWithAuthor;
use super::{assignment, comment, post};

/// Discriminates which payload a timeline item carries. The payload row is
/// created in the same transaction as the item, so an active item always has
/// exactly one payload matching its kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "timeline_item_kind_enum")]
#[serde(rename_all = "lowercase")]
pub enum TimelineItemKind {
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "assignment")]
    Assignment,
}

impl std::fmt::Display for TimelineItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineItemKind::Post => write!(f, "post"),
            TimelineItemKind::Assignment => write!(f, "assignment"),
        }
    }
}

/// Shared feed entry for a course. Owns its attachments and comments, plus
/// exactly one kind-specific payload (post or assignment).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "timeline_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub author_id: i64,
    pub kind: TimelineItemKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(has_many = "super::attachment::Entity")]
    Attachment,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,

    #[sea_orm(has_one = "super::post::Entity")]
    Post,

    #[sea_orm(has_one = "super::assignment::Entity")]
    Assignment,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachment.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn require_non_empty(title: &str, body: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title is required".into()));
    }
    if body.trim().is_empty() {
        return Err(DomainError::Validation("body is required".into()));
    }
    Ok(())
}

async fn insert_item<C: ConnectionTrait>(
    db: &C,
    course_id: i64,
    author_id: i64,
    kind: TimelineItemKind,
    title: &str,
    body: &str,
) -> Result<Model, DbErr> {
    let item = ActiveModel {
        course_id: Set(course_id),
        author_id: Set(author_id),
        kind: Set(kind),
        title: Set(title.to_owned()),
        body: Set(body.to_owned()),
        created_at: Set(Utc::now()),
        is_deleted: Set(false),
        ..Default::default()
    };
    item.insert(db).await
}

impl Model {
    /// Creates a timeline item of kind `post` together with its payload and
    /// attachments in one transaction.
    pub async fn create_post(
        db: &DbConn,
        course_id: i64,
        author_id: i64,
        title: &str,
        body: &str,
        attachments: &[NewAttachment],
    ) -> Result<Model, DomainError> {
        require_non_empty(title, body)?;

        let txn = db.begin().await?;

        let item = insert_item(&txn, course_id, author_id, TimelineItemKind::Post, title, body)
            .await?;

        let payload = post::ActiveModel {
            timeline_item_id: Set(item.id),
            body: Set(body.to_owned()),
            created_at: Set(item.created_at),
            is_deleted: Set(false),
            ..Default::default()
        };
        payload.insert(&txn).await?;

        attachment::Model::insert_many_for_owner(
            &txn,
            AttachmentOwner::TimelineItem(item.id),
            attachments,
        )
        .await?;

        txn.commit().await?;
        Ok(item)
    }

    /// Creates a timeline item of kind `assignment` together with its payload,
    /// normalized allow-list, and attachments in one transaction.
    pub async fn create_assignment(
        db: &DbConn,
        course_id: i64,
        author_id: i64,
        title: &str,
        body: &str,
        deadline: DateTime<Utc>,
        allowed_extensions: &[String],
        attachments: &[NewAttachment],
    ) -> Result<Model, DomainError> {
        require_non_empty(title, body)?;

        let txn = db.begin().await?;

        let item = insert_item(
            &txn,
            course_id,
            author_id,
            TimelineItemKind::Assignment,
            title,
            body,
        )
        .await?;

        let payload = assignment::ActiveModel {
            timeline_item_id: Set(item.id),
            deadline: Set(deadline),
            is_deleted: Set(false),
            ..Default::default()
        };
        let payload = payload.insert(&txn).await?;

        assignment::Model::replace_extensions(&txn, payload.id, allowed_extensions).await?;

        attachment::Model::insert_many_for_owner(
            &txn,
            AttachmentOwner::TimelineItem(item.id),
            attachments,
        )
        .await?;

        txn.commit().await?;
        Ok(item)
    }

    /// Replaces title/body (and attachments, when given) of a post item.
    /// Authorship is absolute: only the original author may edit.
    pub async fn edit_post(
        db: &DbConn,
        item_id: i64,
        requester_id: i64,
        title: &str,
        body: &str,
        attachments: Option<&[NewAttachment]>,
    ) -> Result<(), DomainError> {
        let item = Self::find_active_of_kind(db, item_id, TimelineItemKind::Post)
            .await?
            .ok_or(DomainError::NotFound("post"))?;

        if item.author_id != requester_id {
            return Err(DomainError::Permission(
                "You don't have permission to edit this post",
            ));
        }
        require_non_empty(title, body)?;

        let txn = db.begin().await?;

        let mut update: ActiveModel = item.into();
        update.title = Set(title.to_owned());
        update.body = Set(body.to_owned());
        update.update(&txn).await?;

        post::Entity::update_many()
            .col_expr(post::Column::Body, Expr::value(body))
            .filter(post::Column::TimelineItemId.eq(item_id))
            .filter(post::Column::IsDeleted.eq(false))
            .exec(&txn)
            .await?;

        if let Some(infos) = attachments {
            attachment::Model::replace_for_owner(
                &txn,
                AttachmentOwner::TimelineItem(item_id),
                infos,
            )
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Replaces title/body/deadline (and extensions/attachments, when given)
    /// of an assignment item. Extension and attachment lists are replaced
    /// wholesale, never diffed.
    #[allow(clippy::too_many_arguments)]
    pub async fn edit_assignment(
        db: &DbConn,
        item_id: i64,
        requester_id: i64,
        title: &str,
        body: &str,
        deadline: DateTime<Utc>,
        allowed_extensions: Option<&[String]>,
        attachments: Option<&[NewAttachment]>,
    ) -> Result<(), DomainError> {
        let item = Self::find_active_of_kind(db, item_id, TimelineItemKind::Assignment)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        if item.author_id != requester_id {
            return Err(DomainError::Permission(
                "You don't have permission to edit this assignment",
            ));
        }
        require_non_empty(title, body)?;

        let payload = assignment::Model::find_active_by_item(db, item_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        let txn = db.begin().await?;

        let mut update: ActiveModel = item.into();
        update.title = Set(title.to_owned());
        update.body = Set(body.to_owned());
        update.update(&txn).await?;

        let mut payload_update: assignment::ActiveModel = payload.clone().into();
        payload_update.deadline = Set(deadline);
        payload_update.update(&txn).await?;

        if let Some(extensions) = allowed_extensions {
            assignment::Model::replace_extensions(&txn, payload.id, extensions).await?;
        }

        if let Some(infos) = attachments {
            attachment::Model::replace_for_owner(
                &txn,
                AttachmentOwner::TimelineItem(item_id),
                infos,
            )
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Joint soft delete: the item and its payload are marked deleted in one
    /// transaction, so callers never perform the two-step update themselves.
    pub async fn soft_delete(
        db: &DbConn,
        item_id: i64,
        requester_id: i64,
    ) -> Result<(), DomainError> {
        let item = Self::find_active(db, item_id)
            .await?
            .ok_or(DomainError::NotFound("timeline item"))?;

        if item.author_id != requester_id {
            return Err(DomainError::Permission(
                "You don't have permission to delete this item",
            ));
        }

        let txn = db.begin().await?;

        let kind = item.kind;
        let mut update: ActiveModel = item.into();
        update.is_deleted = Set(true);
        update.update(&txn).await?;

        match kind {
            TimelineItemKind::Post => {
                post::Entity::update_many()
                    .col_expr(post::Column::IsDeleted, Expr::value(true))
                    .filter(post::Column::TimelineItemId.eq(item_id))
                    .exec(&txn)
                    .await?;
            }
            TimelineItemKind::Assignment => {
                assignment::Entity::update_many()
                    .col_expr(assignment::Column::IsDeleted, Expr::value(true))
                    .filter(assignment::Column::TimelineItemId.eq(item_id))
                    .exec(&txn)
                    .await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(db)
            .await
    }

    pub async fn find_active_of_kind<C: ConnectionTrait>(
        db: &C,
        id: i64,
        kind: TimelineItemKind,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::Kind.eq(kind))
            .filter(Column::IsDeleted.eq(false))
            .one(db)
            .await
    }

    /// Newest first; ties broken by id so ordering stays stable.
    pub async fn list_by_course<C: ConnectionTrait>(
        db: &C,
        course_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::IsDeleted.eq(false))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list_by_course_and_kind<C: ConnectionTrait>(
        db: &C,
        course_id: i64,
        kind: TimelineItemKind,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Kind.eq(kind))
            .filter(Column::IsDeleted.eq(false))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}

/// Kind-specific detail exposed by the query façade.
#[derive(Debug, Clone, Serialize)]
pub enum PayloadDetail {
    Post,
    Assignment {
        deadline: DateTime<Utc>,
        allowed_extensions: Vec<String>,
    },
}

/// One fully composed feed entry: item, attachments, comments, and payload
/// detail. `detail` is `None` when the payload row is missing, which the
/// invariant forbids but the façade tolerates.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub item: Model,
    pub attachments: Vec<attachment::Model>,
    pub comments: Vec<CommentWithAuthor>,
    pub detail: Option<PayloadDetail>,
}

/// Feed view: every active item for a course, newest first, fully composed.
pub async fn course_feed(db: &DbConn, course_id: i64) -> Result<Vec<TimelineEntry>, DomainError> {
    let items = Model::list_by_course(db, course_id).await?;

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        entries.push(compose(db, item).await?);
    }
    Ok(entries)
}

/// Detail view for one active item.
pub async fn item_detail(db: &DbConn, item_id: i64) -> Result<TimelineEntry, DomainError> {
    let item = Model::find_active(db, item_id)
        .await?
        .ok_or(DomainError::NotFound("timeline item"))?;

    compose(db, item).await
}

async fn compose(db: &DbConn, item: Model) -> Result<TimelineEntry, DomainError> {
    let attachments =
        attachment::Model::list_for_owner(db, AttachmentOwner::TimelineItem(item.id)).await?;
    let comments = comment::Model::list_for_item(db, item.id).await?;

    let detail = match item.kind {
        TimelineItemKind::Post => post::Model::find_active_by_item(db, item.id)
            .await?
            .map(|_| PayloadDetail::Post),
        TimelineItemKind::Assignment => {
            match assignment::Model::find_active_by_item(db, item.id).await? {
                Some(payload) => {
                    let allowed_extensions = payload.allowed_extensions(db).await?;
                    Some(PayloadDetail::Assignment {
                        deadline: payload.deadline,
                        allowed_extensions,
                    })
                }
                None => None,
            }
        }
    };

    Ok(TimelineEntry {
        item,
        attachments,
        comments,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::{Model, PayloadDetail, TimelineItemKind, course_feed, item_detail};
    use crate::error::DomainError;
    use crate::models::{assignment, post};
    use crate::test_utils::{seed_course_with_members, setup_test_db};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn create_post_creates_matching_payload() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let item = Model::create_post(&db, course_id, instructor_id, "Welcome", "Hello", &[])
            .await
            .unwrap();

        assert_eq!(item.kind, TimelineItemKind::Post);
        let payload = post::Model::find_active_by_item(&db, item.id).await.unwrap();
        assert!(payload.is_some());
        assert_eq!(payload.unwrap().body, "Hello");

        // No assignment payload may exist for a post item.
        let wrong = assignment::Model::find_active_by_item(&db, item.id)
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn create_assignment_normalizes_extensions() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let item = Model::create_assignment(
            &db,
            course_id,
            instructor_id,
            "Practical 1",
            "Implement a parser",
            Utc::now() + Duration::hours(1),
            &["PDF".into(), ".pdf".into(), "DocX".into()],
            &[],
        )
        .await
        .unwrap();

        let payload = assignment::Model::find_active_by_item(&db, item.id)
            .await
            .unwrap()
            .unwrap();
        let extensions = payload.allowed_extensions(&db).await.unwrap();
        assert_eq!(extensions, vec![".pdf".to_string(), ".docx".to_string()]);
    }

    #[tokio::test]
    async fn missing_title_is_rejected() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let err = Model::create_post(&db, course_id, instructor_id, "  ", "Body", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn edit_requires_authorship() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, student_id) = seed_course_with_members(&db).await.unwrap();

        let item = Model::create_post(&db, course_id, instructor_id, "Welcome", "Hello", &[])
            .await
            .unwrap();

        let err = Model::edit_post(&db, item.id, student_id, "Hijacked", "Nope", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Permission(_)));

        Model::edit_post(&db, item.id, instructor_id, "Updated", "New body", None)
            .await
            .unwrap();

        let reread = Model::find_active(&db, item.id).await.unwrap().unwrap();
        assert_eq!(reread.title, "Updated");
        let payload = post::Model::find_active_by_item(&db, item.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payload.body, "New body");
    }

    #[tokio::test]
    async fn soft_delete_hides_item_and_payload() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let item = Model::create_post(&db, course_id, instructor_id, "Welcome", "Hello", &[])
            .await
            .unwrap();
        let other = Model::create_post(&db, course_id, instructor_id, "Other", "Stays", &[])
            .await
            .unwrap();

        Model::soft_delete(&db, item.id, instructor_id).await.unwrap();

        assert!(Model::find_active(&db, item.id).await.unwrap().is_none());
        assert!(
            post::Model::find_active_by_item(&db, item.id)
                .await
                .unwrap()
                .is_none()
        );

        // Unrelated items are unaffected.
        let feed = course_feed(&db, course_id).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].item.id, other.id);

        let err = item_detail(&db, item.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn feed_is_newest_first_with_detail() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let first = Model::create_post(&db, course_id, instructor_id, "First", "a", &[])
            .await
            .unwrap();
        let second = Model::create_assignment(
            &db,
            course_id,
            instructor_id,
            "Second",
            "b",
            Utc::now() + Duration::days(7),
            &["pdf".into()],
            &[],
        )
        .await
        .unwrap();

        let feed = course_feed(&db, course_id).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].item.id, second.id);
        assert_eq!(feed[1].item.id, first.id);

        match &feed[0].detail {
            Some(PayloadDetail::Assignment {
                allowed_extensions, ..
            }) => assert_eq!(allowed_extensions, &vec![".pdf".to_string()]),
            other => panic!("expected assignment detail, got {other:?}"),
        }
        assert!(matches!(feed[1].detail, Some(PayloadDetail::Post)));
    }
}
