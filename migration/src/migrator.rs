use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608010001_create_users::Migration),
            Box::new(migrations::m202608010002_create_courses::Migration),
            Box::new(migrations::m202608010003_create_course_roles::Migration),
            Box::new(migrations::m202608010004_create_timeline_items::Migration),
            Box::new(migrations::m202608010005_create_posts::Migration),
            Box::new(migrations::m202608010006_create_assignments::Migration),
            Box::new(migrations::m202608010007_create_allowed_extensions::Migration),
            Box::new(migrations::m202608010008_create_submissions::Migration),
            Box::new(migrations::m202608010009_create_attachments::Migration),
            Box::new(migrations::m202608010010_create_comments::Migration),
        ]
    }
}
