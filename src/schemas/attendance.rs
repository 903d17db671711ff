use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::AbsenceEvent;
use crate::db::types::AbsenceKind;
use crate::services::attendance::AbsenceStats;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AbsenceCreate {
    #[serde(alias = "studentId")]
    #[validate(length(min = 1, message = "student_id must not be empty"))]
    pub(crate) student_id: String,
    #[serde(alias = "subjectId")]
    #[validate(length(min = 1, message = "subject_id must not be empty"))]
    pub(crate) subject_id: String,
    #[serde(default, alias = "classId")]
    pub(crate) class_id: Option<String>,
    pub(crate) kind: AbsenceKind,
}

#[derive(Debug, Serialize)]
pub(crate) struct AbsenceResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) class_id: Option<String>,
    pub(crate) kind: AbsenceKind,
    pub(crate) recorded_by: String,
    pub(crate) created_at: String,
}

impl AbsenceResponse {
    pub(crate) fn from_db(event: AbsenceEvent) -> Self {
        Self {
            id: event.id,
            student_id: event.student_id,
            subject_id: event.subject_id,
            class_id: event.class_id,
            kind: event.kind,
            recorded_by: event.recorded_by,
            created_at: format_primitive(event.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AbsenceStatsQuery {
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AbsenceStatsResponse {
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) total_sessions: i32,
    #[serde(flatten)]
    pub(crate) stats: AbsenceStats,
}
