use crate::db::types::{PenaltyKind, PenaltySeverity};

pub(crate) const ALL_PENALTY_KINDS: [PenaltyKind; 9] = [
    PenaltyKind::Cheating,
    PenaltyKind::Impersonation,
    PenaltyKind::Forgery,
    PenaltyKind::PhoneInExam,
    PenaltyKind::ExamDisruption,
    PenaltyKind::Harassment,
    PenaltyKind::Vandalism,
    PenaltyKind::Truancy,
    PenaltyKind::DressCode,
];

impl PenaltyKind {
    /// Fixed catalog value copied into every recorded event; recorded rows
    /// never change even if the catalog does.
    pub(crate) fn points(self) -> i32 {
        match self {
            PenaltyKind::Cheating => 10,
            PenaltyKind::Impersonation => 20,
            PenaltyKind::Forgery => 15,
            PenaltyKind::PhoneInExam => 6,
            PenaltyKind::ExamDisruption => 4,
            PenaltyKind::Harassment => 12,
            PenaltyKind::Vandalism => 8,
            PenaltyKind::Truancy => 2,
            PenaltyKind::DressCode => 1,
        }
    }

    /// Severity is descriptive metadata only; totals never weigh by it.
    pub(crate) fn severity(self) -> PenaltySeverity {
        match self {
            PenaltyKind::Cheating
            | PenaltyKind::Impersonation
            | PenaltyKind::Forgery
            | PenaltyKind::Harassment
            | PenaltyKind::Vandalism => PenaltySeverity::Major,
            PenaltyKind::PhoneInExam
            | PenaltyKind::ExamDisruption
            | PenaltyKind::Truancy
            | PenaltyKind::DressCode => PenaltySeverity::Minor,
        }
    }
}
