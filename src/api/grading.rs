use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_instructor_or_self, CurrentInstructor, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::grading::{
    EnrollmentMarksResponse, MarksSubmitRequest, MarksSubmitResponse, ScaleRuleResponse,
};
use crate::services::grading::orchestrator::{
    self, GradingError, MarkSubmission, PgMarksStore,
};
use crate::services::grading::scale::{self, ScaleVariant};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/marks", post(submit_marks))
        .route("/marks/:class_id/:student_id", get(get_enrollment_marks))
        .route("/scales/:variant", get(get_scale))
}

async fn submit_marks(
    CurrentInstructor(instructor): CurrentInstructor,
    State(state): State<AppState>,
    Json(payload): Json<MarksSubmitRequest>,
) -> Result<Json<MarksSubmitResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let store = PgMarksStore { pool: state.db() };
    let outcome = orchestrator::submit_marks(
        state.db(),
        &store,
        MarkSubmission {
            student_id: &payload.student_id,
            subject_id: &payload.subject_id,
            class_id: &payload.class_id,
            instructor_id: &instructor.id,
            raw: payload.marks,
        },
        primitive_now_utc(),
    )
    .await
    .map_err(|err| match err {
        GradingError::Validation(message) => ApiError::BadRequest(message),
        GradingError::Persistence(err) => ApiError::internal(err, "Failed to persist marks"),
    })?;

    Ok(Json(MarksSubmitResponse {
        student_id: payload.student_id,
        subject_id: payload.subject_id,
        class_id: payload.class_id,
        total_score: outcome.total_score,
        letter_grade: outcome.letter_grade,
        points: outcome.points,
        is_retake: outcome.is_retake,
        auto_failed: outcome.auto_failed,
    }))
}

async fn get_enrollment_marks(
    Path((class_id, student_id)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<EnrollmentMarksResponse>, ApiError> {
    require_instructor_or_self(&user, &student_id)?;

    let enrollment =
        repositories::enrollments::find_by_student_class(state.db(), &student_id, &class_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to fetch enrollment"))?
            .ok_or_else(|| ApiError::NotFound("Enrollment not found".to_string()))?;

    Ok(Json(EnrollmentMarksResponse {
        student_id: enrollment.student_id,
        class_id: enrollment.class_id,
        marks: enrollment.marks.0,
    }))
}

async fn get_scale(
    Path(variant): Path<ScaleVariant>,
    CurrentUser(_user): CurrentUser,
) -> Json<Vec<ScaleRuleResponse>> {
    let rules = scale::table(variant)
        .iter()
        .map(|rule| ScaleRuleResponse {
            grade: rule.grade.to_string(),
            min_score: rule.min_score,
            max_score: rule.max_score,
            points: rule.points,
            description: rule.description.to_string(),
        })
        .collect();

    Json(rules)
}

#[cfg(test)]
mod tests;
