mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_course, create_test_note, create_test_user,
    generate_unique_course_code, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_as_admin(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let code = generate_unique_course_code();

    let response = send(
        &app,
        "POST",
        "/api/courses",
        Some(&admin.token),
        Some(json!({
            "course_code": code,
            "course_name": "Data Structures",
            "department": "Computer Science"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["course_code"], code);
    assert_eq!(body["course_name"], "Data Structures");
    assert_eq!(body["created_by"], admin.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_as_student_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_user(&pool, "Student", false).await;

    let response = send(
        &app,
        "POST",
        "/api/courses",
        Some(&student.token),
        Some(json!({
            "course_code": generate_unique_course_code(),
            "course_name": "Data Structures",
            "department": "Computer Science"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Admin privileges required");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_unauthenticated(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(
        &app,
        "POST",
        "/api/courses",
        None,
        Some(json!({
            "course_code": "CS101",
            "course_name": "Intro to CS",
            "department": "Computer Science"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_duplicate_code(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let existing = create_test_course(&pool, &admin, "Mathematics").await;

    let response = send(
        &app,
        "POST",
        "/api/courses",
        Some(&admin.token),
        Some(json!({
            "course_code": existing.course_code,
            "course_name": "Another Course",
            "department": "Mathematics"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Course code already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_create_same_code(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let code = generate_unique_course_code();

    let mut handles = Vec::new();
    for i in 0..5 {
        let app = app.clone();
        let token = admin.token.clone();
        let body = json!({
            "course_code": code,
            "course_name": format!("Racing Course {}", i),
            "department": "Computer Science"
        });
        handles.push(tokio::spawn(async move {
            send(&app, "POST", "/api/courses", Some(&token), Some(body))
                .await
                .status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 4);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE course_code = $1")
        .bind(&code)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_code_too_short(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;

    let response = send(
        &app,
        "POST",
        "/api/courses",
        Some(&admin.token),
        Some(json!({
            "course_code": "CS",
            "course_name": "Intro to CS",
            "department": "Computer Science"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_is_public_and_paginated(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    for _ in 0..5 {
        create_test_course(&pool, &admin, "Physics").await;
    }

    let response = send(&app, "GET", "/api/courses?skip=1&limit=2", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["limit"], 2);
    assert_eq!(body["meta"]["skip"], 1);
    assert_eq!(body["meta"]["has_more"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_skip_past_end(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    create_test_course(&pool, &admin, "Physics").await;

    let response = send(&app, "GET", "/api/courses?skip=10", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_max_skip(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    create_test_course(&pool, &admin, "Physics").await;

    let uri = format!("/api/courses?skip={}", i64::MAX);
    let response = send(&app, "GET", &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["skip"], i64::MAX);
    assert_eq!(body["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_filters(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    create_test_course(&pool, &admin, "Computer Science").await;
    create_test_course(&pool, &admin, "Computer Science").await;
    let history = create_test_course(&pool, &admin, "History").await;

    let response = send(&app, "GET", "/api/courses?department=computer", None, None).await;
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 2);

    let search = history.course_code.to_lowercase();
    let response = send(
        &app,
        "GET",
        &format!("/api/courses?search={}", search),
        None,
        None,
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["course_code"], history.course_code);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_wildcards_are_literal(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    create_test_course(&pool, &admin, "Physics").await;

    let response = send(&app, "GET", "/api/courses?search=%25", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_limit_out_of_range(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, "GET", "/api/courses?limit=0", None, None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, "GET", "/api/courses?limit=101", None, None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, "GET", "/api/courses?skip=-1", None, None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_course_not_found(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(
        &app,
        "GET",
        &format!("/api/courses/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_partial(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let course = create_test_course(&pool, &admin, "Physics").await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", course.id),
        Some(&admin.token),
        Some(json!({ "course_name": "Quantum Mechanics" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["course_name"], "Quantum Mechanics");
    assert_eq!(body["course_code"], course.course_code);
    assert_eq!(body["department"], "Physics");
    assert_ne!(body["updated_at"], body["created_at"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_code_conflict(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let first = create_test_course(&pool, &admin, "Physics").await;
    let second = create_test_course(&pool, &admin, "Physics").await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", second.id),
        Some(&admin.token),
        Some(json!({ "course_code": first.course_code })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_keeping_own_code(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let course = create_test_course(&pool, &admin, "Physics").await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", course.id),
        Some(&admin.token),
        Some(json!({ "course_code": course.course_code, "department": "Applied Physics" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_as_student_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let student = create_test_user(&pool, "Student", false).await;
    let course = create_test_course(&pool, &admin, "Physics").await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", course.id),
        Some(&student.token),
        Some(json!({ "course_name": "Hijacked" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_course(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", Uuid::new_v4()),
        Some(&admin.token),
        Some(json!({ "course_name": "Nothing" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_cascades_to_notes(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let student = create_test_user(&pool, "Student", false).await;
    let course = create_test_course(&pool, &admin, "Physics").await;
    let note_id = create_test_note(&pool, &course, &student, "Lecture one", 0).await;
    create_test_note(&pool, &course, &student, "Lecture two", 0).await;

    let response = send(
        &app,
        "DELETE",
        &format!("/api/courses/{}", course.id),
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/notes/{}", note_id), None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE course_id = $1")
        .bind(course.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_twice(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let course = create_test_course(&pool, &admin, "Physics").await;
    let uri = format!("/api/courses/{}", course.id);

    let response = send(&app, "DELETE", &uri, Some(&admin.token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", &uri, Some(&admin.token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_as_student_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "Admin", true).await;
    let student = create_test_user(&pool, "Student", false).await;
    let course = create_test_course(&pool, &admin, "Physics").await;

    let response = send(
        &app,
        "DELETE",
        &format!("/api/courses/{}", course.id),
        Some(&student.token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_course_id(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = send(&app, "GET", "/api/courses/not-a-uuid", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
