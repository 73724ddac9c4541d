use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter};
use serde::{Deserialize, Serialize};

/// Post payload: the 1:1 extension of a timeline item of kind `post`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub timeline_item_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
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
}

impl Related<super::timeline_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimelineItem.def()
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
}
