//! Seed rows and seeding configuration.

use snippets_models::{CourseId, FileType, UserId};

/// Emails of generated users end with this domain; clearing seed data keys
/// off it.
pub const SEED_EMAIL_DOMAIN: &str = "seed.example.com";

/// Password shared by every generated user.
pub const SEED_PASSWORD: &str = "password123";

pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: Option<String>,
    pub is_admin: bool,
}

pub struct CourseSeed {
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub created_by: UserId,
}

pub struct NoteSeed {
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: FileType,
    pub course_id: CourseId,
    pub uploaded_by: UserId,
    pub upvotes_count: i32,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub num_courses: usize,
    pub notes_per_course: usize,
    pub num_uploaders: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_courses: 10,
            notes_per_course: 5,
            num_uploaders: 10,
        }
    }
}

impl SeedConfig {
    pub fn new(num_courses: usize) -> Self {
        Self {
            num_courses,
            ..Default::default()
        }
    }

    pub fn with_notes_per_course(mut self, notes_per_course: usize) -> Self {
        self.notes_per_course = notes_per_course;
        self
    }

    pub fn with_uploaders(mut self, num_uploaders: usize) -> Self {
        self.num_uploaders = num_uploaders;
        self
    }

    pub fn total_notes(&self) -> usize {
        self.num_courses * self.notes_per_course
    }
}
