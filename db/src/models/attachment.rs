use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder};
use serde::{Deserialize, Serialize};

/// File metadata only; bytes live in external storage and are referenced by
/// `file_path`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub upload_date: DateTime<Utc>,
    pub timeline_item_id: Option<i64>,
    pub assignment_submission_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::timeline_item::Entity",
        from = "Column::TimelineItemId",
        to = "super::timeline_item::Column::Id",
        on_delete = "Cascade"
    )]
    TimelineItem,

    #[sea_orm(
        belongs_to = "super::submission::Entity",
        from = "Column::AssignmentSubmissionId",
        to = "super::submission::Column::Id",
        on_delete = "Cascade"
    )]
    Submission,
}

impl Related<super::timeline_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimelineItem.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Tagged parent reference. Every attachment belongs to exactly one owner;
/// the storage layer keeps two nullable FKs plus a CHECK, this enum is the
/// only way application code addresses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOwner {
    TimelineItem(i64),
    Submission(i64),
}

/// Incoming attachment metadata from a request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewAttachment {
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

impl Model {
    pub fn owner(&self) -> Option<AttachmentOwner> {
        match (self.timeline_item_id, self.assignment_submission_id) {
            (Some(id), None) => Some(AttachmentOwner::TimelineItem(id)),
            (None, Some(id)) => Some(AttachmentOwner::Submission(id)),
            _ => None,
        }
    }

    pub async fn insert_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: AttachmentOwner,
        info: &NewAttachment,
    ) -> Result<Model, DbErr> {
        let (item_id, submission_id) = match owner {
            AttachmentOwner::TimelineItem(id) => (Some(id), None),
            AttachmentOwner::Submission(id) => (None, Some(id)),
        };

        let attachment = ActiveModel {
            file_name: Set(info.file_name.clone()),
            file_path: Set(info.file_path.clone()),
            file_type: Set(info.file_type.clone()),
            file_size: Set(info.file_size),
            upload_date: Set(Utc::now()),
            timeline_item_id: Set(item_id),
            assignment_submission_id: Set(submission_id),
            ..Default::default()
        };

        attachment.insert(db).await
    }

    pub async fn insert_many_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: AttachmentOwner,
        infos: &[NewAttachment],
    ) -> Result<Vec<Model>, DbErr> {
        let mut inserted = Vec::with_capacity(infos.len());
        for info in infos {
            inserted.push(Self::insert_for_owner(db, owner, info).await?);
        }
        Ok(inserted)
    }

    /// Wholesale replacement: drop everything the owner has, reinsert the new
    /// set. Edits and resubmissions never diff attachment lists.
    pub async fn replace_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: AttachmentOwner,
        infos: &[NewAttachment],
    ) -> Result<Vec<Model>, DbErr> {
        Self::delete_for_owner(db, owner).await?;
        Self::insert_many_for_owner(db, owner, infos).await
    }

    pub async fn delete_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: AttachmentOwner,
    ) -> Result<(), DbErr> {
        let delete = match owner {
            AttachmentOwner::TimelineItem(id) => {
                Entity::delete_many().filter(Column::TimelineItemId.eq(id))
            }
            AttachmentOwner::Submission(id) => {
                Entity::delete_many().filter(Column::AssignmentSubmissionId.eq(id))
            }
        };
        delete.exec(db).await?;
        Ok(())
    }

    pub async fn list_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: AttachmentOwner,
    ) -> Result<Vec<Model>, DbErr> {
        let query = match owner {
            AttachmentOwner::TimelineItem(id) => {
                Entity::find().filter(Column::TimelineItemId.eq(id))
            }
            AttachmentOwner::Submission(id) => {
                Entity::find().filter(Column::AssignmentSubmissionId.eq(id))
            }
        };
        query.order_by_asc(Column::Id).all(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::{AttachmentOwner, Model, NewAttachment};
    use crate::models::timeline_item::Model as TimelineItemModel;
    use crate::test_utils::{seed_course_with_members, setup_test_db};

    fn info(name: &str) -> NewAttachment {
        NewAttachment {
            file_name: name.to_owned(),
            file_path: format!("/store/{name}"),
            file_type: "application/octet-stream".to_owned(),
            file_size: 128,
        }
    }

    #[tokio::test]
    async fn owner_is_exactly_one_parent() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let item = TimelineItemModel::create_post(
            &db,
            course_id,
            instructor_id,
            "Welcome",
            "First post",
            &[info("syllabus.pdf")],
        )
        .await
        .unwrap();

        let attachments =
            Model::list_for_owner(&db, AttachmentOwner::TimelineItem(item.id))
                .await
                .unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(
            attachments[0].owner(),
            Some(AttachmentOwner::TimelineItem(item.id))
        );
        assert!(attachments[0].assignment_submission_id.is_none());
    }

    #[tokio::test]
    async fn replace_is_wholesale() {
        let db = setup_test_db().await;
        let (course_id, instructor_id, _) = seed_course_with_members(&db).await.unwrap();

        let item = TimelineItemModel::create_post(
            &db,
            course_id,
            instructor_id,
            "Notes",
            "Lecture notes",
            &[info("week1.pdf"), info("week2.pdf")],
        )
        .await
        .unwrap();

        let owner = AttachmentOwner::TimelineItem(item.id);
        Model::replace_for_owner(&db, owner, &[info("week3.pdf")])
            .await
            .unwrap();

        let attachments = Model::list_for_owner(&db, owner).await.unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].file_name, "week3.pdf");
    }
}
