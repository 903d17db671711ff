use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::AbsenceEvent;
use crate::db::types::AbsenceKind;

pub(crate) struct CreateAbsenceEvent<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) subject_id: &'a str,
    pub(crate) class_id: Option<&'a str>,
    pub(crate) kind: AbsenceKind,
    pub(crate) recorded_by: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAbsenceEvent<'_>,
) -> Result<AbsenceEvent, sqlx::Error> {
    sqlx::query_as::<_, AbsenceEvent>(
        "INSERT INTO absence_events (id, student_id, subject_id, class_id, kind, recorded_by, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, student_id, subject_id, class_id, kind, recorded_by, created_at",
    )
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.subject_id)
    .bind(params.class_id)
    .bind(params.kind)
    .bind(params.recorded_by)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_kinds(
    pool: &PgPool,
    student_id: &str,
    subject_id: &str,
) -> Result<Vec<AbsenceKind>, sqlx::Error> {
    sqlx::query_scalar::<_, AbsenceKind>(
        "SELECT kind
         FROM absence_events
         WHERE student_id = $1 AND subject_id = $2
         ORDER BY created_at",
    )
    .bind(student_id)
    .bind(subject_id)
    .fetch_all(pool)
    .await
}
