use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::MarksDistributionRow;
use crate::services::grading::score::Distribution;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct DistributionUpdate {
    #[validate(range(min = 0.0, max = 100.0, message = "midterm weight must be within 0..100"))]
    pub(crate) midterm: f64,
    #[serde(rename = "final")]
    #[validate(range(min = 0.0, max = 100.0, message = "final weight must be within 0..100"))]
    pub(crate) final_exam: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "homework weight must be within 0..100"))]
    pub(crate) homework: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "labs weight must be within 0..100"))]
    pub(crate) labs: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "quizzes weight must be within 0..100"))]
    pub(crate) quizzes: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "participation weight must be within 0..100"))]
    pub(crate) participation: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "attendance weight must be within 0..100"))]
    pub(crate) attendance: f64,
}

impl From<&DistributionUpdate> for Distribution {
    fn from(payload: &DistributionUpdate) -> Self {
        Self {
            midterm: payload.midterm,
            final_exam: payload.final_exam,
            homework: payload.homework,
            labs: payload.labs,
            quizzes: payload.quizzes,
            participation: payload.participation,
            attendance: payload.attendance,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DistributionResponse {
    pub(crate) subject_id: String,
    pub(crate) midterm: f64,
    #[serde(rename = "final")]
    pub(crate) final_exam: f64,
    pub(crate) homework: f64,
    pub(crate) labs: f64,
    pub(crate) quizzes: f64,
    pub(crate) participation: f64,
    pub(crate) attendance: f64,
    pub(crate) updated_at: Option<String>,
}

impl DistributionResponse {
    pub(crate) fn from_row(row: MarksDistributionRow) -> Self {
        Self {
            subject_id: row.subject_id,
            midterm: row.midterm,
            final_exam: row.final_exam,
            homework: row.homework,
            labs: row.labs,
            quizzes: row.quizzes,
            participation: row.participation,
            attendance: row.attendance,
            updated_at: Some(format_primitive(row.updated_at)),
        }
    }

    pub(crate) fn from_default(subject_id: String) -> Self {
        let defaults = Distribution::default();
        Self {
            subject_id,
            midterm: defaults.midterm,
            final_exam: defaults.final_exam,
            homework: defaults.homework,
            labs: defaults.labs,
            quizzes: defaults.quizzes,
            participation: defaults.participation,
            attendance: defaults.attendance,
            updated_at: None,
        }
    }
}
