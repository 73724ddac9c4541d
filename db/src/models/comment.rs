use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::{timeline_item, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timeline_item_id: i64,
    pub author_id: i64,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub is_deleted: bool,
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
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::timeline_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimelineItem.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Comment joined with its author, as the feed and detail views render it.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    pub comment: Model,
    pub author: Option<user::Model>,
}

impl Model {
    /// Adds a comment under an active timeline item.
    pub async fn add(
        db: &DbConn,
        timeline_item_id: i64,
        author_id: i64,
        content: &str,
    ) -> Result<Model, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }

        timeline_item::Model::find_active(db, timeline_item_id)
            .await?
            .ok_or(DomainError::NotFound("timeline item"))?;

        let row = ActiveModel {
            timeline_item_id: Set(timeline_item_id),
            author_id: Set(author_id),
            content: Set(content.to_owned()),
            posted_at: Set(Utc::now()),
            is_deleted: Set(false),
            ..Default::default()
        };
        Ok(row.insert(db).await?)
    }

    /// Rewrites a comment's content. Only its author may edit.
    pub async fn edit(
        db: &DbConn,
        comment_id: i64,
        requester_id: i64,
        content: &str,
    ) -> Result<Model, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }

        let comment = Self::find_active(db, comment_id)
            .await?
            .ok_or(DomainError::NotFound("comment"))?;

        if comment.author_id != requester_id {
            return Err(DomainError::Permission(
                "You don't have permission to edit this comment",
            ));
        }

        let mut update: ActiveModel = comment.into();
        update.content = Set(content.to_owned());
        Ok(update.update(db).await?)
    }

    /// Soft-deletes a comment. Allowed for the comment's author and for the
    /// author of the timeline item it hangs under.
    pub async fn delete(
        db: &DbConn,
        comment_id: i64,
        requester_id: i64,
    ) -> Result<(), DomainError> {
        let comment = Self::find_active(db, comment_id)
            .await?
            .ok_or(DomainError::NotFound("comment"))?;

        if comment.author_id != requester_id {
            let item = timeline_item::Entity::find_by_id(comment.timeline_item_id)
                .one(db)
                .await?
                .ok_or(DomainError::NotFound("timeline item"))?;
            if item.author_id != requester_id {
                return Err(DomainError::Permission(
                    "You don't have permission to delete this comment",
                ));
            }
        }

        let mut update: ActiveModel = comment.into();
        update.is_deleted = Set(true);
        update.update(db).await?;
        Ok(())
    }

    pub async fn find_active(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(db)
            .await
    }

    /// Active comments for an item, oldest first, each with its author.
    pub async fn list_for_item<C: ConnectionTrait>(
        db: &C,
        timeline_item_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, DbErr> {
        let rows = Entity::find()
            .filter(Column::TimelineItemId.eq(timeline_item_id))
            .filter(Column::IsDeleted.eq(false))
            .order_by_asc(Column::PostedAt)
            .order_by_asc(Column::Id)
            .find_also_related(user::Entity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentWithAuthor { comment, author })
            .collect())
    }
}
