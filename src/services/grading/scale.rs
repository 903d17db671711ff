use serde::{Deserialize, Serialize};

use crate::services::grading::score::clamp_score;

/// Which grade-to-points lookup table applies. Adding a variant means adding
/// a table, not touching the resolution algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ScaleVariant {
    Standard,
    Retake,
}

/// One row of a grade scale. Bounds are inclusive; administrative grades
/// (WF/FA/FB) carry no bounds and are never matched by score resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GradeScaleRule {
    pub(crate) grade: &'static str,
    pub(crate) min_score: Option<f64>,
    pub(crate) max_score: Option<f64>,
    pub(crate) points: Option<f64>,
    pub(crate) description: &'static str,
}

const fn rule(
    grade: &'static str,
    min_score: f64,
    max_score: f64,
    points: f64,
    description: &'static str,
) -> GradeScaleRule {
    GradeScaleRule {
        grade,
        min_score: Some(min_score),
        max_score: Some(max_score),
        points: Some(points),
        description,
    }
}

const fn administrative(grade: &'static str, description: &'static str) -> GradeScaleRule {
    GradeScaleRule { grade, min_score: None, max_score: None, points: Some(0.0), description }
}

pub(crate) const STANDARD_SCALE: &[GradeScaleRule] = &[
    rule("A", 90.0, 100.0, 4.0, "Excellent"),
    rule("B+", 85.0, 89.99, 3.5, "Very Good"),
    rule("B", 80.0, 84.99, 3.0, "Good"),
    rule("C+", 75.0, 79.99, 2.5, "Above Average"),
    rule("C", 70.0, 74.99, 2.0, "Average"),
    rule("D+", 65.0, 69.99, 1.5, "Below Average"),
    rule("D", 60.0, 64.99, 1.0, "Pass"),
    rule("F", 0.0, 59.99, 0.0, "Fail"),
    administrative("WF", "Withdrawal Failure"),
    administrative("FA", "Failure due to Absence"),
    administrative("FB", "Failure due to Behavior"),
];

/// Retake enrollments cap out below "A"; B+ absorbs the top of the range.
pub(crate) const RETAKE_SCALE: &[GradeScaleRule] = &[
    rule("B+", 85.0, 100.0, 3.5, "Very Good"),
    rule("B", 80.0, 84.99, 3.0, "Good"),
    rule("C+", 75.0, 79.99, 2.5, "Above Average"),
    rule("C", 70.0, 74.99, 2.0, "Average"),
    rule("D+", 65.0, 69.99, 1.5, "Below Average"),
    rule("D", 60.0, 64.99, 1.0, "Pass"),
    rule("F", 0.0, 59.99, 0.0, "Fail"),
    administrative("WF", "Withdrawal Failure"),
    administrative("FA", "Failure due to Absence"),
    administrative("FB", "Failure due to Behavior"),
];

pub(crate) fn table(variant: ScaleVariant) -> &'static [GradeScaleRule] {
    match variant {
        ScaleVariant::Standard => STANDARD_SCALE,
        ScaleVariant::Retake => RETAKE_SCALE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedGrade {
    pub(crate) grade: &'static str,
    pub(crate) points: f64,
    pub(crate) description: &'static str,
}

const FALLBACK: ResolvedGrade = ResolvedGrade { grade: "F", points: 0.0, description: "Fail" };

/// First rule whose inclusive range contains the total wins. Totals are
/// clamped into [0, 100] first; an unmatched total degrades to F rather than
/// erroring.
pub(crate) fn resolve(total: f64, variant: ScaleVariant) -> ResolvedGrade {
    let total = clamp_score(total);

    for rule in table(variant) {
        let (Some(min), Some(max)) = (rule.min_score, rule.max_score) else {
            continue;
        };
        if total >= min && total <= max {
            return ResolvedGrade {
                grade: rule.grade,
                points: rule.points.unwrap_or(0.0),
                description: rule.description,
            };
        }
    }

    FALLBACK
}

/// The administrative grade assigned when the absence limit forces a fail.
/// This is a separate code path from score-based resolution.
pub(crate) fn absence_failure() -> ResolvedGrade {
    ResolvedGrade { grade: "FA", points: 0.0, description: "Failure due to Absence" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scale_resolves_a_band() {
        let resolved = resolve(95.0, ScaleVariant::Standard);
        assert_eq!(resolved.grade, "A");
        assert_eq!(resolved.points, 4.0);
    }

    #[test]
    fn retake_scale_has_no_a_band() {
        let resolved = resolve(95.0, ScaleVariant::Retake);
        assert_eq!(resolved.grade, "B+");
        assert_eq!(resolved.points, 3.5);
    }

    #[test]
    fn pass_fail_boundary_is_inclusive() {
        let fail = resolve(59.0, ScaleVariant::Standard);
        assert_eq!((fail.grade, fail.points), ("F", 0.0));

        let pass = resolve(60.0, ScaleVariant::Standard);
        assert_eq!((pass.grade, pass.points), ("D", 1.0));
    }

    #[test]
    fn two_decimal_totals_never_fall_between_bands() {
        let resolved = resolve(59.99, ScaleVariant::Standard);
        assert_eq!(resolved.grade, "F");
        let resolved = resolve(89.99, ScaleVariant::Standard);
        assert_eq!(resolved.grade, "B+");
    }

    #[test]
    fn weighted_scenario_total_resolves_to_b_plus() {
        let resolved = resolve(87.0, ScaleVariant::Standard);
        assert_eq!((resolved.grade, resolved.points), ("B+", 3.5));
    }

    #[test]
    fn out_of_range_totals_are_clamped_not_dropped() {
        assert_eq!(resolve(120.0, ScaleVariant::Standard).grade, "A");
        assert_eq!(resolve(-3.0, ScaleVariant::Standard).grade, "F");
        assert_eq!(resolve(f64::NAN, ScaleVariant::Standard).grade, "F");
    }

    #[test]
    fn administrative_grades_are_never_score_resolved() {
        for total in [0.0, 50.0, 75.0, 100.0] {
            for variant in [ScaleVariant::Standard, ScaleVariant::Retake] {
                let resolved = resolve(total, variant);
                assert!(!matches!(resolved.grade, "WF" | "FA" | "FB"));
            }
        }
    }

    #[test]
    fn absence_failure_is_fa_with_zero_points() {
        let resolved = absence_failure();
        assert_eq!((resolved.grade, resolved.points), ("FA", 0.0));
    }
}
