use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::authz::is_course_owner;
use crate::db::CourseRepository;
use crate::error::AppError;
use crate::models::{Course, NewCourseRequest};
use crate::services::Outcome;

pub const FORBIDDEN_REASON: &str = "Unauthorized";

#[derive(Clone)]
pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_courses(&self) -> Result<Outcome<Vec<Course>>, AppError> {
        let courses = self.repo.find_all().await?;
        debug!("listing {} courses", courses.len());
        Ok(Outcome::from_list(courses))
    }

    /// Stores the payload as-is. A payload carrying an existing id overwrites that course.
    pub async fn create_course(&self, course: NewCourseRequest) -> Result<Course, AppError> {
        let course = self.repo.save(course).await?;
        info!(
            "saved course {} for owner {:?}",
            course.id, course.owner_wallet_address
        );
        Ok(course)
    }

    pub async fn delete_course(
        &self,
        id: i64,
        requester_wallet: Option<&str>,
    ) -> Result<Outcome<()>, AppError> {
        let Some(course) = self.repo.find_owner(id).await? else {
            debug!("delete requested for missing course {}", id);
            return Ok(Outcome::NotFound);
        };

        if !is_course_owner(&course, requester_wallet) {
            warn!(
                "rejected delete of course {} by {:?} (owner {:?})",
                id, requester_wallet, course.owner_wallet_address
            );
            return Ok(Outcome::Forbidden(FORBIDDEN_REASON.to_string()));
        }

        self.repo.delete_by_id(id).await?;
        info!("deleted course {}", id);
        Ok(Outcome::Ok(()))
    }

    pub async fn list_by_owner(&self, owner_wallet_address: &str) -> Result<Vec<Course>, AppError> {
        Ok(self.repo.find_by_owner(owner_wallet_address).await?)
    }

    pub async fn find_course(&self, id: i64) -> Result<Outcome<Course>, AppError> {
        Ok(Outcome::from_option(self.repo.find_by_id(id).await?))
    }

    pub async fn zoom_link(&self, id: i64) -> Result<Outcome<String>, AppError> {
        let Some(course) = self.repo.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        match course.zoom_link {
            Some(link) if !link.is_empty() => Ok(Outcome::Ok(link)),
            _ => Ok(Outcome::NoContent),
        }
    }
}
