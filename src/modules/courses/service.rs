use snippets_core::{AppError, PaginationMeta};
use snippets_db::contains_pattern;
use snippets_models::{CourseId, User};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use crate::metrics;
use crate::middleware::role::ensure_admin;

use super::model::{
    Course, CourseFilterParams, CreateCourseDto, PaginatedCoursesResponse, UpdateCourseDto,
};

const COURSE_COLUMNS: &str =
    "id, course_code, course_name, department, created_by, created_at, updated_at";

fn course_code_conflict() -> AppError {
    AppError::conflict("Course code already exists")
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        warn!("Course code unique constraint rejected the write");
        return course_code_conflict();
    }
    error!(error = %e, "Database error writing course");
    AppError::from(e)
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, requester, dto), fields(user.id = %requester.id, course.code = %dto.course_code, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(
        db: &PgPool,
        requester: &User,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        ensure_admin(requester)?;

        let code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE course_code = $1)",
        )
        .bind(&dto.course_code)
        .fetch_one(db)
        .await?;

        if code_taken {
            warn!(course.code = %dto.course_code, "Attempted to create course with existing code");
            return Err(course_code_conflict());
        }

        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (course_code, course_name, department, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.course_code)
        .bind(&dto.course_name)
        .bind(&dto.department)
        .bind(requester.id)
        .fetch_one(db)
        .await
        .map_err(map_unique_violation)?;

        metrics::track_course_created();
        info!(course.id = %course.id, course.code = %course.course_code, "Course created");

        Ok(course)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses(
        db: &PgPool,
        filters: CourseFilterParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let limit = filters.limit();
        let skip = filters.skip();

        debug!(
            limit,
            skip,
            filter.department = ?filters.department,
            filter.search = ?filters.search,
            "Fetching courses"
        );

        let mut where_clause = String::from(" WHERE 1=1");
        let mut params = Vec::new();

        if let Some(department) = &filters.department {
            params.push(contains_pattern(department));
            where_clause.push_str(&format!(" AND department ILIKE ${}", params.len()));
        }

        if let Some(search) = &filters.search {
            params.push(contains_pattern(search));
            let n = params.len();
            where_clause.push_str(&format!(
                " AND (course_name ILIKE ${n} OR course_code ILIKE ${n})"
            ));
        }

        let count_query = format!("SELECT COUNT(*) FROM courses{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {COURSE_COLUMNS} FROM courses{where_clause}
             ORDER BY created_at DESC, id
             LIMIT {limit} OFFSET {skip}"
        );
        let mut data_sql = sqlx::query_as::<_, Course>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let courses = data_sql.fetch_all(db).await?;

        debug!(total, returned = courses.len(), "Courses fetched");

        Ok(PaginatedCoursesResponse {
            data: courses,
            meta: PaginationMeta::new(total, limit, skip),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course(db: &PgPool, course_id: CourseId) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            debug!(course.id = %course_id, "Course not found");
            AppError::not_found(anyhow::anyhow!("Course not found"))
        })
    }

    #[instrument(skip(db, requester, dto), fields(user.id = %requester.id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        requester: &User,
        course_id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        ensure_admin(requester)?;

        let mut tx = db.begin().await?;

        let existing = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 FOR UPDATE"
        ))
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        if let Some(code) = &dto.course_code
            && *code != existing.course_code
        {
            let code_taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE course_code = $1 AND id <> $2)",
            )
            .bind(code)
            .bind(course_id)
            .fetch_one(&mut *tx)
            .await?;

            if code_taken {
                warn!(course.id = %course_id, course.code = %code, "Course code already in use");
                return Err(course_code_conflict());
            }
        }

        let course_code = dto.course_code.unwrap_or(existing.course_code);
        let course_name = dto.course_name.unwrap_or(existing.course_name);
        let department = dto.department.unwrap_or(existing.department);

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET course_code = $1, course_name = $2, department = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&course_code)
        .bind(&course_name)
        .bind(&department)
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await?;

        info!(course.id = %course.id, "Course updated");

        Ok(course)
    }

    #[instrument(skip(db, requester), fields(user.id = %requester.id, db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete_course(
        db: &PgPool,
        requester: &User,
        course_id: CourseId,
    ) -> Result<(), AppError> {
        ensure_admin(requester)?;

        let mut tx = db.begin().await?;

        let note_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(&mut *tx)
                .await?;

        // Notes go with the course through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            debug!(course.id = %course_id, "Course not found for deletion");
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        tx.commit().await?;

        info!(course.id = %course_id, notes.deleted = note_count, "Course deleted");

        Ok(())
    }
}
