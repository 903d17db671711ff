use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::MarksDistributionRow;
use crate::services::grading::score::Distribution;

pub(crate) async fn find_by_subject(
    pool: &PgPool,
    subject_id: &str,
) -> Result<Option<MarksDistributionRow>, sqlx::Error> {
    sqlx::query_as::<_, MarksDistributionRow>(
        "SELECT subject_id, midterm, final_exam, homework, labs, quizzes, participation, \
         attendance, updated_at
         FROM marks_distributions
         WHERE subject_id = $1",
    )
    .bind(subject_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn upsert(
    pool: &PgPool,
    subject_id: &str,
    distribution: &Distribution,
    now: PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO marks_distributions
             (subject_id, midterm, final_exam, homework, labs, quizzes, participation, \
              attendance, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         ON CONFLICT (subject_id) DO UPDATE
         SET midterm = EXCLUDED.midterm,
             final_exam = EXCLUDED.final_exam,
             homework = EXCLUDED.homework,
             labs = EXCLUDED.labs,
             quizzes = EXCLUDED.quizzes,
             participation = EXCLUDED.participation,
             attendance = EXCLUDED.attendance,
             updated_at = EXCLUDED.updated_at",
    )
    .bind(subject_id)
    .bind(distribution.midterm)
    .bind(distribution.final_exam)
    .bind(distribution.homework)
    .bind(distribution.labs)
    .bind(distribution.quizzes)
    .bind(distribution.participation)
    .bind(distribution.attendance)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}
