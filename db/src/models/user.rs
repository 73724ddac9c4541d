use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Collaborator record: identity lives elsewhere, this table only carries
/// what responses and authorization checks need.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_role::Entity")]
    CourseRole,
}

impl Related<super::course_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        first_name: &str,
        last_name: &str,
        email: &str,
        image_url: Option<&str>,
    ) -> Result<Model, DbErr> {
        let user = ActiveModel {
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            email: Set(email.to_owned()),
            image_url: Set(image_url.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
