pub mod allowed_extension;
pub mod assignment;
pub mod attachment;
pub mod comment;
pub mod course;
pub mod course_role;
pub mod post;
pub mod submission;
pub mod timeline_item;
pub mod user;

pub use allowed_extension::Entity as AllowedExtension;
pub use assignment::Entity as Assignment;
pub use attachment::Entity as Attachment;
pub use comment::Entity as Comment;
pub use course::Entity as Course;
pub use course_role::Entity as CourseRole;
pub use post::Entity as Post;
pub use submission::Entity as Submission;
pub use timeline_item::Entity as TimelineItem;
pub use user::Entity as User;
