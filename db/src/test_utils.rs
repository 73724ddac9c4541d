use migration::Migrator;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::models::course_role::{self, Role};
use crate::models::{course, user};

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Seeds a course with one instructor and one student, returning
/// `(course_id, instructor_id, student_id)`.
pub async fn seed_course_with_members(db: &DatabaseConnection) -> Result<(i64, i64, i64), DbErr> {
    let instructor =
        user::Model::create(db, "Iris", "Instructor", "iris@classline.test", None).await?;
    let student = user::Model::create(db, "Sam", "Student", "sam@classline.test", None).await?;
    let course = course::Model::create(db, "Systems Programming").await?;

    course_role::Model::assign(db, course.id, instructor.id, Role::Instructor).await?;
    course_role::Model::assign(db, course.id, student.id, Role::Student).await?;

    Ok((course.id, instructor.id, student.id))
}
