use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's role within one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_role_enum")]
pub enum Role {
    #[sea_orm(string_value = "instructor")]
    Instructor,
    #[sea_orm(string_value = "student")]
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Instructor => write!(f, "instructor"),
            Role::Student => write!(f, "student"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "course_roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
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
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn assign(
        db: &DbConn,
        course_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<Model, DbErr> {
        let membership = ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            role: Set(role),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        membership.insert(db).await
    }

    pub async fn has_role(
        db: &DbConn,
        course_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<bool, DbErr> {
        let found = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Role.eq(role))
            .one(db)
            .await?;

        Ok(found.is_some())
    }

    pub async fn is_instructor(db: &DbConn, course_id: i64, user_id: i64) -> Result<bool, DbErr> {
        Self::has_role(db, course_id, user_id, Role::Instructor).await
    }
}
