use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::PenaltyEvent;
use crate::db::types::{PenaltyKind, PenaltySeverity};

pub(crate) struct CreatePenaltyEvent<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) subject_id: Option<&'a str>,
    pub(crate) kind: PenaltyKind,
    pub(crate) severity: PenaltySeverity,
    pub(crate) points: i32,
    pub(crate) note: Option<&'a str>,
    pub(crate) recorded_by: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreatePenaltyEvent<'_>,
) -> Result<PenaltyEvent, sqlx::Error> {
    sqlx::query_as::<_, PenaltyEvent>(
        "INSERT INTO penalty_events
             (id, student_id, subject_id, kind, severity, points, note, recorded_by, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING id, student_id, subject_id, kind, severity, points, note, recorded_by, created_at",
    )
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.subject_id)
    .bind(params.kind)
    .bind(params.severity)
    .bind(params.points)
    .bind(params.note)
    .bind(params.recorded_by)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_newest_first(
    pool: &PgPool,
    student_id: &str,
    subject_id: Option<&str>,
) -> Result<Vec<PenaltyEvent>, sqlx::Error> {
    match subject_id {
        Some(subject_id) => {
            sqlx::query_as::<_, PenaltyEvent>(
                "SELECT id, student_id, subject_id, kind, severity, points, note, recorded_by, created_at
                 FROM penalty_events
                 WHERE student_id = $1 AND subject_id = $2
                 ORDER BY created_at DESC",
            )
            .bind(student_id)
            .bind(subject_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, PenaltyEvent>(
                "SELECT id, student_id, subject_id, kind, severity, points, note, recorded_by, created_at
                 FROM penalty_events
                 WHERE student_id = $1
                 ORDER BY created_at DESC",
            )
            .bind(student_id)
            .fetch_all(pool)
            .await
        }
    }
}

pub(crate) async fn total_points(
    pool: &PgPool,
    student_id: &str,
    subject_id: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let total: Option<i64> = match subject_id {
        Some(subject_id) => {
            sqlx::query_scalar(
                "SELECT SUM(points)::bigint
                 FROM penalty_events
                 WHERE student_id = $1 AND subject_id = $2",
            )
            .bind(student_id)
            .bind(subject_id)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(
                "SELECT SUM(points)::bigint FROM penalty_events WHERE student_id = $1",
            )
            .bind(student_id)
            .fetch_one(pool)
            .await?
        }
    };

    Ok(total.unwrap_or(0))
}
