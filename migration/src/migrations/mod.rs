pub mod m202608010001_create_users;
pub mod m202608010002_create_courses;
pub mod m202608010003_create_course_roles;
pub mod m202608010004_create_timeline_items;
pub mod m202608010005_create_posts;
pub mod m202608010006_create_assignments;
pub mod m202608010007_create_allowed_extensions;
pub mod m202608010008_create_submissions;
pub mod m202608010009_create_attachments;
pub mod m202608010010_create_comments;
