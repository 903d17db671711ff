use sqlx::PgPool;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::repositories;

/// Fire-and-forget delivery. A failed insert is logged and swallowed so a
/// notification problem can never block or roll back grade persistence.
pub(crate) async fn dispatch(
    pool: &PgPool,
    user_id: &str,
    title: &str,
    message: &str,
    metadata: serde_json::Value,
    now: PrimitiveDateTime,
) {
    let result = repositories::notifications::create(
        pool,
        repositories::notifications::CreateNotification {
            id: &Uuid::new_v4().to_string(),
            user_id,
            title,
            message,
            metadata,
            created_at: now,
        },
    )
    .await;

    if let Err(err) = result {
        tracing::warn!(error = %err, user_id, "Failed to dispatch notification");
    }
}
