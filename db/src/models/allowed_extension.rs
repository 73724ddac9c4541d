use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "assignment_allowed_extensions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub extension: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Canonical form for stored extensions: lower-case with a leading dot.
/// Applied at every write boundary so comparisons are plain equality.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

/// Lower-cased extension of a file name, dot included; empty when there is
/// no extension.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx < file_name.len() - 1 => {
            file_name[idx..].to_lowercase()
        }
        _ => String::new(),
    }
}
