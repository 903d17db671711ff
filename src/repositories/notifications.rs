use sqlx::types::Json;
use sqlx::PgPool;
use time::PrimitiveDateTime;

pub(crate) struct CreateNotification<'a> {
    pub(crate) id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) message: &'a str,
    pub(crate) metadata: serde_json::Value,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateNotification<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO notifications (id, user_id, title, message, metadata, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.title)
    .bind(params.message)
    .bind(Json(params.metadata))
    .bind(params.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
