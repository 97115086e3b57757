//! # Snippets Models
//!
//! Domain models and DTOs for the Study Snippets API.
//!
//! # Modules
//!
//! - [`ids`]: Typed UUID newtypes for users, courses and notes
//! - [`users`]: User entity and registration DTO
//! - [`auth`]: Login request and token response
//! - [`courses`]: Course entity, DTOs and listing filters
//! - [`notes`]: Note entity, uploader-enriched view, DTOs and listing filters
//!
//! # Example
//!
//! ```ignore
//! use snippets_models::courses::{CreateCourseDto, CourseFilterParams};
//! use validator::Validate;
//!
//! let dto = CreateCourseDto {
//!     course_code: "CS101".into(),
//!     course_name: "Intro to Computer Science".into(),
//!     department: "Computer Science".into(),
//! };
//! dto.validate()?;
//! ```

pub mod auth;
pub mod courses;
pub mod ids;
pub mod notes;
pub mod users;

pub use auth::{LoginRequest, TokenResponse};
pub use courses::{
    Course, CourseFilterParams, CreateCourseDto, PaginatedCoursesResponse, UpdateCourseDto,
};
pub use ids::{CourseId, NoteId, UserId};
pub use notes::{
    CreateNoteDto, FileType, Note, NoteFilterParams, NoteSort, NoteWithUploader,
    PaginatedNotesResponse, UpdateNoteDto,
};
pub use users::{RegisterRequestDto, User};
