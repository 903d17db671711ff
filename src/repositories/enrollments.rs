use sqlx::types::Json;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::{Enrollment, SubjectMarks};

pub(crate) async fn find_by_student_class(
    pool: &PgPool,
    student_id: &str,
    class_id: &str,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, student_id, class_id, retake_subjects, marks, created_at, updated_at
         FROM enrollments
         WHERE student_id = $1 AND class_id = $2",
    )
    .bind(student_id)
    .bind(class_id)
    .fetch_optional(pool)
    .await
}

/// Merge one subject's mark sub-object into the shared enrollment record.
/// The update goes through jsonb_set on the single subject key, so two
/// instructors grading different subjects of the same enrollment cannot
/// clobber each other's writes.
pub(crate) async fn upsert_subject_marks(
    pool: &PgPool,
    enrollment_id: &str,
    student_id: &str,
    class_id: &str,
    subject_id: &str,
    marks: &SubjectMarks,
    now: PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO enrollments (id, student_id, class_id, retake_subjects, marks, created_at, updated_at)
         VALUES ($1, $2, $3, '[]'::jsonb, jsonb_build_object($4::text, $5::jsonb), $6, $6)
         ON CONFLICT (student_id, class_id) DO UPDATE
         SET marks = jsonb_set(COALESCE(enrollments.marks, '{}'::jsonb), ARRAY[$4::text], $5::jsonb),
             updated_at = $6",
    )
    .bind(enrollment_id)
    .bind(student_id)
    .bind(class_id)
    .bind(subject_id)
    .bind(Json(marks))
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}
