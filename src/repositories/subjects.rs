use sqlx::PgPool;

use crate::db::models::Subject;

pub(crate) async fn find_by_id(
    pool: &PgPool,
    subject_id: &str,
) -> Result<Option<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT id, program_id, title, credit_hours, total_sessions, created_at, updated_at
         FROM subjects
         WHERE id = $1",
    )
    .bind(subject_id)
    .fetch_optional(pool)
    .await
}
