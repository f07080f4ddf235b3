use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A course as stored. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "cid")]
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner_wallet_address: Option<String>,
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_fees")]
    pub fees: Option<String>,
    pub zoom_link: Option<String>,
    /// Loaded from `course_joined_students`, not from the `courses` row.
    #[serde(default)]
    #[sqlx(skip)]
    pub joined_students: Vec<String>,
}

/// The columns an ownership check needs, without the joined-students list.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CourseOwner {
    pub id: i64,
    pub owner_wallet_address: Option<String>,
}

/// Create payload. An `id` of `None` or `0` inserts; an existing id overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    #[serde(default, alias = "cid")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner_wallet_address: Option<String>,
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_fees")]
    pub fees: Option<String>,
    pub zoom_link: Option<String>,
    #[serde(default)]
    pub joined_students: Vec<String>,
}

impl NewCourseRequest {
    /// The id to overwrite, if any. Zero is treated as unset.
    pub fn existing_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            owner_wallet_address: self.owner_wallet_address,
            level: self.level,
            course_type: self.course_type,
            location: self.location,
            fees: self.fees,
            zoom_link: self.zoom_link,
            joined_students: self.joined_students,
        }
    }
}

impl From<Course> for NewCourseRequest {
    fn from(course: Course) -> Self {
        Self {
            id: Some(course.id),
            title: course.title,
            description: course.description,
            owner_wallet_address: course.owner_wallet_address,
            level: course.level,
            course_type: course.course_type,
            location: course.location,
            fees: course.fees,
            zoom_link: course.zoom_link,
            joined_students: course.joined_students,
        }
    }
}

// The web client posts fees as a number.
fn deserialize_fees<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Fees {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Fees>::deserialize(deserializer)?.map(|fees| match fees {
        Fees::Text(text) => text,
        Fees::Number(number) => number.to_string(),
    }))
}
