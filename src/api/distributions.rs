use axum::extract::{Path, State};
use axum::{routing::get, Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentInstructor, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::distribution::{DistributionResponse, DistributionUpdate};
use crate::services::grading::score::Distribution;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:subject_id/distribution", get(get_distribution).put(set_distribution))
}

/// Reads never fail: a subject without a stored distribution gets the
/// documented defaults.
async fn get_distribution(
    Path(subject_id): Path<String>,
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DistributionResponse>, ApiError> {
    let row = repositories::distributions::find_by_subject(state.db(), &subject_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch marks distribution"))?;

    let response = match row {
        Some(row) => DistributionResponse::from_row(row),
        None => DistributionResponse::from_default(subject_id),
    };

    Ok(Json(response))
}

async fn set_distribution(
    Path(subject_id): Path<String>,
    CurrentInstructor(instructor): CurrentInstructor,
    State(state): State<AppState>,
    Json(payload): Json<DistributionUpdate>,
) -> Result<Json<DistributionResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let distribution = Distribution::from(&payload);
    if let Err(message) = distribution.validate_total() {
        return Err(ApiError::BadRequest(message));
    }

    let now = primitive_now_utc();
    repositories::distributions::upsert(state.db(), &subject_id, &distribution, now)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to persist marks distribution"))?;

    tracing::info!(
        instructor_id = %instructor.id,
        subject_id = %subject_id,
        "Marks distribution updated"
    );

    let row = repositories::distributions::find_by_subject(state.db(), &subject_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated distribution"))?
        .ok_or_else(|| ApiError::Internal("Distribution missing after update".to_string()))?;

    Ok(Json(DistributionResponse::from_row(row)))
}

#[cfg(test)]
mod tests;
