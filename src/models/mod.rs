pub mod course;
pub mod user;

pub use course::{Course, CourseOwner, NewCourseRequest};
pub use user::User;
