use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "absencekind", rename_all = "snake_case")]
pub(crate) enum AbsenceKind {
    WithExcuse,
    WithoutExcuse,
    Bereavement,
    BeyondControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "penaltykind", rename_all = "snake_case")]
pub(crate) enum PenaltyKind {
    Cheating,
    Impersonation,
    Forgery,
    PhoneInExam,
    ExamDisruption,
    Harassment,
    Vandalism,
    Truancy,
    DressCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "penaltyseverity", rename_all = "lowercase")]
pub(crate) enum PenaltySeverity {
    Minor,
    Major,
}
