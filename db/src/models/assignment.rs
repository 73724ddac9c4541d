use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use super::allowed_extension::{self, normalize};

/// Assignment payload: the 1:1 extension of a timeline item of kind
/// `assignment`, carrying the deadline and the extension allow-list.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub timeline_item_id: i64,
    pub deadline: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::timeline_item::Entity",
        from = "Column::TimelineItemId",
        to = "super::timeline_item::Column::Id",
        on_delete = "Restrict"
    )]
    TimelineItem,

    #[sea_orm(has_many = "super::allowed_extension::Entity")]
    AllowedExtension,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::timeline_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimelineItem.def()
    }
}

impl Related<super::allowed_extension::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AllowedExtension.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_active_by_item<C: ConnectionTrait>(
        db: &C,
        timeline_item_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::TimelineItemId.eq(timeline_item_id))
            .filter(Column::IsDeleted.eq(false))
            .one(db)
            .await
    }

    /// Stored allow-list in canonical form, insertion order preserved.
    pub async fn allowed_extensions<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<String>, DbErr> {
        let rows = allowed_extension::Entity::find()
            .filter(allowed_extension::Column::AssignmentId.eq(self.id))
            .order_by_asc(allowed_extension::Column::Id)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| r.extension).collect())
    }

    /// Replaces the allow-list wholesale with the normalized, de-duplicated
    /// input set.
    pub async fn replace_extensions<C: ConnectionTrait>(
        db: &C,
        assignment_id: i64,
        extensions: &[String],
    ) -> Result<(), DbErr> {
        allowed_extension::Entity::delete_many()
            .filter(allowed_extension::Column::AssignmentId.eq(assignment_id))
            .exec(db)
            .await?;

        let mut seen: Vec<String> = Vec::new();
        for raw in extensions {
            let ext = normalize(raw);
            if seen.contains(&ext) {
                continue;
            }
            seen.push(ext.clone());

            let row = allowed_extension::ActiveModel {
                assignment_id: Set(assignment_id),
                extension: Set(ext),
                ..Default::default()
            };
            row.insert(db).await?;
        }

        Ok(())
    }
}
