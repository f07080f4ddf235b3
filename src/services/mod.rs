pub mod course_service;
pub mod outcome;
pub mod user_service;

pub use course_service::CourseService;
pub use outcome::Outcome;
pub use user_service::UserService;
