use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{AbsenceKind, PenaltyKind, PenaltySeverity};

/// Subject directory entry. Owned by the academic-admin collaborator;
/// `total_sessions` is the contact-hour figure the absence check divides by.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Subject {
    pub(crate) id: String,
    pub(crate) program_id: String,
    pub(crate) title: String,
    pub(crate) credit_hours: i32,
    pub(crate) total_sessions: i32,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct MarksDistributionRow {
    pub(crate) subject_id: String,
    pub(crate) midterm: f64,
    pub(crate) final_exam: f64,
    pub(crate) homework: f64,
    pub(crate) labs: f64,
    pub(crate) quizzes: f64,
    pub(crate) participation: f64,
    pub(crate) attendance: f64,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// Shared per-(student, class) record. All subjects' marks live in the
/// `marks` map, so writers must merge one subject's sub-object instead of
/// replacing the whole column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) class_id: String,
    pub(crate) retake_subjects: Json<Vec<String>>,
    pub(crate) marks: Json<HashMap<String, SubjectMarks>>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// One subject's graded marks inside an enrollment record. Created on first
/// save, overwritten on regrade with `created_at` preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SubjectMarks {
    pub(crate) midterm: f64,
    #[serde(rename = "final")]
    pub(crate) final_exam: f64,
    pub(crate) homework: f64,
    pub(crate) labs: f64,
    pub(crate) quizzes: f64,
    pub(crate) participation: f64,
    pub(crate) attendance: f64,
    pub(crate) total_score: f64,
    pub(crate) letter_grade: String,
    pub(crate) points: f64,
    pub(crate) is_retake: bool,
    pub(crate) graded_by: String,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct AbsenceEvent {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) class_id: Option<String>,
    pub(crate) kind: AbsenceKind,
    pub(crate) recorded_by: String,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct PenaltyEvent {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: Option<String>,
    pub(crate) kind: PenaltyKind,
    pub(crate) severity: PenaltySeverity,
    pub(crate) points: i32,
    pub(crate) note: Option<String>,
    pub(crate) recorded_by: String,
    pub(crate) created_at: PrimitiveDateTime,
}

