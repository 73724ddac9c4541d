use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timeline_item::Entity")]
    TimelineItem,

    #[sea_orm(has_many = "super::course_role::Entity")]
    CourseRole,
}

impl Related<super::timeline_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimelineItem.def()
    }
}

impl Related<super::course_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, title: &str) -> Result<Model, DbErr> {
        let course = ActiveModel {
            title: Set(title.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        course.insert(db).await
    }
}
