use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_instructor_or_self, CurrentInstructor, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::penalty::{
    PenaltyCreate, PenaltyListQuery, PenaltyListResponse, PenaltyResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(record_penalty).get(list_penalties))
}

async fn record_penalty(
    CurrentInstructor(instructor): CurrentInstructor,
    State(state): State<AppState>,
    Json(payload): Json<PenaltyCreate>,
) -> Result<(axum::http::StatusCode, Json<PenaltyResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Points and severity are snapshotted from the catalog; the stored event
    // stays immutable even if the catalog is revised later.
    let event = repositories::penalty_events::create(
        state.db(),
        repositories::penalty_events::CreatePenaltyEvent {
            id: &Uuid::new_v4().to_string(),
            student_id: &payload.student_id,
            subject_id: payload.subject_id.as_deref(),
            kind: payload.kind,
            severity: payload.kind.severity(),
            points: payload.kind.points(),
            note: payload.note.as_deref(),
            recorded_by: &instructor.id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record penalty"))?;

    Ok((axum::http::StatusCode::CREATED, Json(PenaltyResponse::from_db(event))))
}

async fn list_penalties(
    Query(query): Query<PenaltyListQuery>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<PenaltyListResponse>, ApiError> {
    require_instructor_or_self(&user, &query.student_id)?;

    let events = repositories::penalty_events::list_newest_first(
        state.db(),
        &query.student_id,
        query.subject_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list penalties"))?;

    let total_points = repositories::penalty_events::total_points(
        state.db(),
        &query.student_id,
        query.subject_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to total penalties"))?;

    Ok(Json(PenaltyListResponse {
        events: events.into_iter().map(PenaltyResponse::from_db).collect(),
        total_points,
    }))
}
