use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::SubjectMarks;
use crate::services::grading::score::RawMarks;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct MarksSubmitRequest {
    #[serde(alias = "studentId")]
    #[validate(length(min = 1, message = "student_id must not be empty"))]
    pub(crate) student_id: String,
    #[serde(alias = "subjectId")]
    #[validate(length(min = 1, message = "subject_id must not be empty"))]
    pub(crate) subject_id: String,
    #[serde(alias = "classId")]
    #[validate(length(min = 1, message = "class_id must not be empty"))]
    pub(crate) class_id: String,
    #[serde(default)]
    pub(crate) marks: RawMarks,
}

#[derive(Debug, Serialize)]
pub(crate) struct MarksSubmitResponse {
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) class_id: String,
    pub(crate) total_score: f64,
    pub(crate) letter_grade: String,
    pub(crate) points: f64,
    pub(crate) is_retake: bool,
    pub(crate) auto_failed: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrollmentMarksResponse {
    pub(crate) student_id: String,
    pub(crate) class_id: String,
    pub(crate) marks: HashMap<String, SubjectMarks>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScaleRuleResponse {
    pub(crate) grade: String,
    pub(crate) min_score: Option<f64>,
    pub(crate) max_score: Option<f64>,
    pub(crate) points: Option<f64>,
    pub(crate) description: String,
}
