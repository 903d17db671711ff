use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::PenaltyEvent;
use crate::db::types::{PenaltyKind, PenaltySeverity};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct PenaltyCreate {
    #[serde(alias = "studentId")]
    #[validate(length(min = 1, message = "student_id must not be empty"))]
    pub(crate) student_id: String,
    #[serde(default, alias = "subjectId")]
    pub(crate) subject_id: Option<String>,
    pub(crate) kind: PenaltyKind,
    #[serde(default)]
    pub(crate) note: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PenaltyResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: Option<String>,
    pub(crate) kind: PenaltyKind,
    pub(crate) severity: PenaltySeverity,
    pub(crate) points: i32,
    pub(crate) note: Option<String>,
    pub(crate) recorded_by: String,
    pub(crate) created_at: String,
}

impl PenaltyResponse {
    pub(crate) fn from_db(event: PenaltyEvent) -> Self {
        Self {
            id: event.id,
            student_id: event.student_id,
            subject_id: event.subject_id,
            kind: event.kind,
            severity: event.severity,
            points: event.points,
            note: event.note,
            recorded_by: event.recorded_by,
            created_at: format_primitive(event.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PenaltyListQuery {
    pub(crate) student_id: String,
    #[serde(default)]
    pub(crate) subject_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PenaltyListResponse {
    pub(crate) events: Vec<PenaltyResponse>,
    pub(crate) total_points: i64,
}
