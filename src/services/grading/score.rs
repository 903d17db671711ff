use serde::{Deserialize, Serialize};

use crate::db::models::MarksDistributionRow;

/// Deviation allowed when checking that distribution weights total 100.
pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Raw component scores as submitted by an instructor. Components left out
/// of the payload count as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub(crate) struct RawMarks {
    #[serde(default)]
    pub(crate) midterm: f64,
    #[serde(default, rename = "final")]
    pub(crate) final_exam: f64,
    #[serde(default)]
    pub(crate) homework: f64,
    #[serde(default)]
    pub(crate) labs: f64,
    #[serde(default)]
    pub(crate) quizzes: f64,
    #[serde(default)]
    pub(crate) participation: f64,
    #[serde(default)]
    pub(crate) attendance: f64,
}

/// Per-subject component weights. Must total 100 before being trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct Distribution {
    pub(crate) midterm: f64,
    #[serde(rename = "final")]
    pub(crate) final_exam: f64,
    pub(crate) homework: f64,
    pub(crate) labs: f64,
    pub(crate) quizzes: f64,
    pub(crate) participation: f64,
    pub(crate) attendance: f64,
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            midterm: 20.0,
            final_exam: 40.0,
            homework: 5.0,
            labs: 10.0,
            quizzes: 5.0,
            participation: 10.0,
            attendance: 10.0,
        }
    }
}

impl Distribution {
    /// Clamp every weight into [0, 100] before any computation trusts it.
    pub(crate) fn sanitized(&self) -> Self {
        Self {
            midterm: clamp_score(self.midterm),
            final_exam: clamp_score(self.final_exam),
            homework: clamp_score(self.homework),
            labs: clamp_score(self.labs),
            quizzes: clamp_score(self.quizzes),
            participation: clamp_score(self.participation),
            attendance: clamp_score(self.attendance),
        }
    }

    pub(crate) fn weight_sum(&self) -> f64 {
        self.midterm
            + self.final_exam
            + self.homework
            + self.labs
            + self.quizzes
            + self.participation
            + self.attendance
    }

    /// Weight-sum invariant checked on every set; clamping happens first so
    /// an out-of-range weight cannot smuggle the sum back to 100.
    pub(crate) fn validate_total(&self) -> Result<(), String> {
        let sum = self.sanitized().weight_sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("Distribution weights must sum to 100, got {sum:.2}"));
        }
        Ok(())
    }
}

impl From<&MarksDistributionRow> for Distribution {
    fn from(row: &MarksDistributionRow) -> Self {
        Self {
            midterm: row.midterm,
            final_exam: row.final_exam,
            homework: row.homework,
            labs: row.labs,
            quizzes: row.quizzes,
            participation: row.participation,
            attendance: row.attendance,
        }
    }
}

/// Weighted total over the seven fixed components, rounded to 2 decimals.
/// Malformed numeric input (NaN, negative) is coerced to 0 and values above
/// 100 are capped, per the lenient-input policy.
pub(crate) fn compute_total(raw: &RawMarks, distribution: &Distribution) -> f64 {
    let pairs = [
        (raw.midterm, distribution.midterm),
        (raw.final_exam, distribution.final_exam),
        (raw.homework, distribution.homework),
        (raw.labs, distribution.labs),
        (raw.quizzes, distribution.quizzes),
        (raw.participation, distribution.participation),
        (raw.attendance, distribution.attendance),
    ];

    let total: f64 =
        pairs.iter().map(|(mark, weight)| clamp_score(*mark) * clamp_score(*weight) / 100.0).sum();

    round2(total)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        0.0
    } else if value > 100.0 {
        100.0
    } else {
        value
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
