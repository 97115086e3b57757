#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::Value;
use snippets::router::init_router;
use snippets::state::AppState;
use snippets_auth::create_access_token;
use snippets_config::{CorsConfig, JwtConfig};
use snippets_core::hash_password;
use snippets_models::{CourseId, FileType, NoteId, UserId};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub token: String,
}

pub struct TestCourse {
    pub id: CourseId,
    pub course_code: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        algorithm: Algorithm::HS256,
        access_token_expire_minutes: 30,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@uni.edu", Uuid::new_v4())
}

pub fn generate_unique_course_code() -> String {
    format!("T{}", &Uuid::new_v4().simple().to_string()[..8]).to_uppercase()
}

pub async fn create_test_user(pool: &PgPool, first_name: &str, is_admin: bool) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (email, hashed_password, first_name, last_name, is_admin)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(&email)
    .bind(&hashed)
    .bind(first_name)
    .bind("Tester")
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(id.into_inner(), &test_jwt_config()).unwrap();

    TestUser { id, email, token }
}

pub async fn create_test_course(pool: &PgPool, owner: &TestUser, department: &str) -> TestCourse {
    let course_code = generate_unique_course_code();

    let id = sqlx::query_scalar::<_, CourseId>(
        "INSERT INTO courses (course_code, course_name, department, created_by)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&course_code)
    .bind(format!("Course {}", course_code))
    .bind(department)
    .bind(owner.id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestCourse { id, course_code }
}

pub async fn create_test_note(
    pool: &PgPool,
    course: &TestCourse,
    uploader: &TestUser,
    title: &str,
    upvotes: i32,
) -> NoteId {
    sqlx::query_scalar::<_, NoteId>(
        "INSERT INTO notes (title, file_url, file_type, course_id, uploaded_by, upvotes_count)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(title)
    .bind("https://files.example.com/note.pdf")
    .bind(FileType::Pdf)
    .bind(course.id)
    .bind(uploader.id)
    .bind(upvotes)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
