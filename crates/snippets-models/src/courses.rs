//! Course entity, DTOs and listing filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snippets_core::PaginationMeta;
use snippets_core::serde::{deserialize_optional_i64, deserialize_optional_string};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{CourseId, UserId};

pub const DEFAULT_COURSE_LIMIT: i64 = 100;
pub const MAX_COURSE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 3, max = 20))]
    #[schema(example = "CS101")]
    pub course_code: String,
    #[validate(length(min = 3, max = 200))]
    #[schema(example = "Introduction to Computer Science")]
    pub course_name: String,
    #[validate(length(min = 2, max = 100))]
    #[schema(example = "Computer Science")]
    pub department: String,
}

/// Partial course update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 3, max = 20))]
    pub course_code: Option<String>,
    #[validate(length(min = 3, max = 200))]
    pub course_name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Case-insensitive substring match on department
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub department: Option<String>,
    /// Case-insensitive substring match on course name or code
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    /// Rows to skip (default 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,
    /// Page size (1-100, default 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl CourseFilterParams {
    #[must_use]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_COURSE_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<Course>,
    pub meta: PaginationMeta,
}
