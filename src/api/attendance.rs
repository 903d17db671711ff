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
use crate::schemas::attendance::{
    AbsenceCreate, AbsenceResponse, AbsenceStatsQuery, AbsenceStatsResponse,
};
use crate::services::attendance;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/absences", post(record_absence)).route("/stats", get(get_stats))
}

async fn record_absence(
    CurrentInstructor(instructor): CurrentInstructor,
    State(state): State<AppState>,
    Json(payload): Json<AbsenceCreate>,
) -> Result<(axum::http::StatusCode, Json<AbsenceResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let event = repositories::absence_events::create(
        state.db(),
        repositories::absence_events::CreateAbsenceEvent {
            id: &Uuid::new_v4().to_string(),
            student_id: &payload.student_id,
            subject_id: &payload.subject_id,
            class_id: payload.class_id.as_deref(),
            kind: payload.kind,
            recorded_by: &instructor.id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record absence"))?;

    Ok((axum::http::StatusCode::CREATED, Json(AbsenceResponse::from_db(event))))
}

async fn get_stats(
    Query(query): Query<AbsenceStatsQuery>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<AbsenceStatsResponse>, ApiError> {
    require_instructor_or_self(&user, &query.student_id)?;

    let subject = repositories::subjects::find_by_id(state.db(), &query.subject_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch subject"))?
        .ok_or_else(|| ApiError::NotFound("Subject not found".to_string()))?;

    let kinds =
        repositories::absence_events::list_kinds(state.db(), &query.student_id, &query.subject_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to list absence events"))?;

    let stats = attendance::compute_stats(&kinds, subject.total_sessions);

    Ok(Json(AbsenceStatsResponse {
        student_id: query.student_id,
        subject_id: query.subject_id,
        total_sessions: subject.total_sessions,
        stats,
    }))
}
