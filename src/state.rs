use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::{SqliteCourseRepository, SqliteUserRepository};
use crate::services::{CourseService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub courses: CourseService,
    pub users: UserService,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        let courses = CourseService::new(Arc::new(SqliteCourseRepository::new(db.clone())));
        let users = UserService::new(Arc::new(SqliteUserRepository::new(db.clone())));
        Self { db, courses, users }
    }
}
