use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::{Course, CourseOwner, NewCourseRequest};

/// Persistence operations for courses, independent of transport.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Course>, sqlx::Error>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, sqlx::Error>;
    /// Ownership columns only. `None` when the course does not exist.
    async fn find_owner(&self, id: i64) -> Result<Option<CourseOwner>, sqlx::Error>;
    /// Exact, case-sensitive match on the owner wallet address.
    async fn find_by_owner(&self, owner_wallet_address: &str) -> Result<Vec<Course>, sqlx::Error>;
    /// Inserts when the request carries no id (or an id with no row), otherwise overwrites.
    async fn save(&self, course: NewCourseRequest) -> Result<Course, sqlx::Error>;
    /// No-op when the id is absent.
    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error>;
}

/// Field-to-column mapping for `Course`. `joined_students` lives in
/// `course_joined_students`, ordered by `position`.
const COURSE_COLUMNS: &str =
    "id, title, description, owner_wallet_address, level, course_type, location, fees, zoom_link";

enum StudentScope<'a> {
    All,
    Owner(&'a str),
    Course(i64),
}

#[derive(Clone)]
pub struct SqliteCourseRepository {
    db: SqlitePool,
}

impl SqliteCourseRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn fetch_students(
        &self,
        scope: StudentScope<'_>,
    ) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
        let base = "SELECT s.course_id, s.student FROM course_joined_students s";
        let rows: Vec<(i64, String)> = match scope {
            StudentScope::All => {
                sqlx::query_as(&format!("{} ORDER BY s.course_id, s.position", base))
                    .fetch_all(&self.db)
                    .await?
            }
            StudentScope::Owner(owner) => {
                sqlx::query_as(&format!(
                    "{} JOIN courses c ON c.id = s.course_id \
                     WHERE c.owner_wallet_address = ? ORDER BY s.course_id, s.position",
                    base
                ))
                .bind(owner)
                .fetch_all(&self.db)
                .await?
            }
            StudentScope::Course(id) => {
                sqlx::query_as(&format!("{} WHERE s.course_id = ? ORDER BY s.position", base))
                    .bind(id)
                    .fetch_all(&self.db)
                    .await?
            }
        };

        let mut students: HashMap<i64, Vec<String>> = HashMap::new();
        for (course_id, student) in rows {
            students.entry(course_id).or_default().push(student);
        }
        Ok(students)
    }

    async fn with_students(
        &self,
        mut courses: Vec<Course>,
        scope: StudentScope<'_>,
    ) -> Result<Vec<Course>, sqlx::Error> {
        if courses.is_empty() {
            return Ok(courses);
        }
        let mut students = self.fetch_students(scope).await?;
        for course in &mut courses {
            course.joined_students = students.remove(&course.id).unwrap_or_default();
        }
        Ok(courses)
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn find_all(&self) -> Result<Vec<Course>, sqlx::Error> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses ORDER BY id",
            COURSE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        self.with_students(courses, StudentScope::All).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, sqlx::Error> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = ?",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match course {
            Some(course) => Ok(self
                .with_students(vec![course], StudentScope::Course(id))
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    async fn find_owner(&self, id: i64) -> Result<Option<CourseOwner>, sqlx::Error> {
        sqlx::query_as::<_, CourseOwner>(
            "SELECT id, owner_wallet_address FROM courses WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn find_by_owner(&self, owner_wallet_address: &str) -> Result<Vec<Course>, sqlx::Error> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE owner_wallet_address = ? ORDER BY id",
            COURSE_COLUMNS
        ))
        .bind(owner_wallet_address)
        .fetch_all(&self.db)
        .await?;

        self.with_students(courses, StudentScope::Owner(owner_wallet_address))
            .await
    }

    async fn save(&self, course: NewCourseRequest) -> Result<Course, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        // The first statement must be a write: a deferred transaction that
        // reads first cannot upgrade its lock while another writer holds one.
        let updated = match course.existing_id() {
            Some(id) => {
                let rows = sqlx::query(
                    "UPDATE courses SET title = ?, description = ?, owner_wallet_address = ?, level = ?, course_type = ?, location = ?, fees = ?, zoom_link = ? WHERE id = ?"
                )
                .bind(&course.title)
                .bind(&course.description)
                .bind(&course.owner_wallet_address)
                .bind(&course.level)
                .bind(&course.course_type)
                .bind(&course.location)
                .bind(&course.fees)
                .bind(&course.zoom_link)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

                (rows > 0).then_some(id)
            }
            None => None,
        };

        let id = match updated {
            Some(id) => {
                sqlx::query("DELETE FROM course_joined_students WHERE course_id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                sqlx::query(
                    "INSERT INTO courses (title, description, owner_wallet_address, level, course_type, location, fees, zoom_link) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
                )
                .bind(&course.title)
                .bind(&course.description)
                .bind(&course.owner_wallet_address)
                .bind(&course.level)
                .bind(&course.course_type)
                .bind(&course.location)
                .bind(&course.fees)
                .bind(&course.zoom_link)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid()
            }
        };

        insert_students(&mut tx, id, &course.joined_students).await?;
        tx.commit().await?;

        Ok(course.into_course(id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM course_joined_students WHERE course_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}

async fn insert_students(
    tx: &mut Transaction<'_, Sqlite>,
    course_id: i64,
    students: &[String],
) -> Result<(), sqlx::Error> {
    for (position, student) in students.iter().enumerate() {
        sqlx::query(
            "INSERT INTO course_joined_students (course_id, position, student) VALUES (?, ?, ?)"
        )
        .bind(course_id)
        .bind(position as i64)
        .bind(student)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
