use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use snippets_core::PaginationMeta;
use snippets_core::errors::ErrorResponse;
use snippets_models::{
    Course, CourseFilterParams, CreateCourseDto, CreateNoteDto, FileType, LoginRequest, Note,
    NoteFilterParams, NoteSort, NoteWithUploader, PaginatedCoursesResponse,
    PaginatedNotesResponse, RegisterRequestDto, TokenResponse, UpdateCourseDto, UpdateNoteDto,
    User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::notes::controller::create_note,
        crate::modules::notes::controller::get_notes,
        crate::modules::notes::controller::get_note,
        crate::modules::notes::controller::update_note,
        crate::modules::notes::controller::delete_note,
    ),
    components(
        schemas(
            User,
            RegisterRequestDto,
            LoginRequest,
            TokenResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            CourseFilterParams,
            PaginatedCoursesResponse,
            FileType,
            Note,
            NoteWithUploader,
            CreateNoteDto,
            UpdateNoteDto,
            NoteSort,
            NoteFilterParams,
            PaginatedNotesResponse,
            PaginationMeta,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Courses", description = "Course catalogue; writes are admin-only"),
        (name = "Notes", description = "Course notes uploaded by students")
    ),
    info(
        title = "Study Snippets API",
        version = "0.1.0",
        description = "Course notes sharing backend built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
