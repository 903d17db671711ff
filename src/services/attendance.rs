use serde::Serialize;

use crate::db::types::AbsenceKind;
use crate::services::grading::score::round2;

/// Absence rate above which the subject is failed outright, regardless of
/// any earned score.
pub(crate) const ABSENCE_LIMIT_PERCENT: f64 = 20.0;

impl AbsenceKind {
    pub(crate) fn deduction_weight(self) -> f64 {
        match self {
            AbsenceKind::WithExcuse => 0.25,
            AbsenceKind::WithoutExcuse => 0.50,
            AbsenceKind::Bereavement => 0.0,
            AbsenceKind::BeyondControl => 0.25,
        }
    }

    /// Bereavement and beyond-control absences count in the excused bucket
    /// even though their deduction weights differ.
    pub(crate) fn is_excused(self) -> bool {
        !matches!(self, AbsenceKind::WithoutExcuse)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub(crate) struct AbsenceStats {
    pub(crate) total_absences: u32,
    pub(crate) with_excuse: u32,
    pub(crate) without_excuse: u32,
    pub(crate) percentage: f64,
    pub(crate) attendance_deduction: f64,
    pub(crate) exceeds_limit: bool,
    pub(crate) will_fail: bool,
}

/// Accumulate absence events into pass/fail standing. With zero scheduled
/// sessions there is nothing to miss, so the stats stay all-zero and the
/// student cannot auto-fail.
pub(crate) fn compute_stats(events: &[AbsenceKind], total_sessions: i32) -> AbsenceStats {
    if total_sessions <= 0 {
        return AbsenceStats::default();
    }

    let mut with_excuse = 0u32;
    let mut without_excuse = 0u32;
    let mut attendance_deduction = 0.0;

    for kind in events {
        if kind.is_excused() {
            with_excuse += 1;
        } else {
            without_excuse += 1;
        }
        attendance_deduction += kind.deduction_weight();
    }

    let total_absences = events.len() as u32;
    let percentage = round2(100.0 * f64::from(total_absences) / f64::from(total_sessions));
    let exceeds_limit = percentage > ABSENCE_LIMIT_PERCENT;

    AbsenceStats {
        total_absences,
        with_excuse,
        without_excuse,
        percentage,
        attendance_deduction: round2(attendance_deduction),
        exceeds_limit,
        will_fail: exceeds_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_events_means_clean_standing() {
        let stats = compute_stats(&[], 10);
        assert_eq!(stats.percentage, 0.0);
        assert!(!stats.exceeds_limit);
        assert!(!stats.will_fail);
    }

    #[test]
    fn over_twenty_percent_fails_automatically() {
        let events = vec![AbsenceKind::WithoutExcuse; 21];
        let stats = compute_stats(&events, 100);
        assert_eq!(stats.percentage, 21.0);
        assert!(stats.exceeds_limit);
        assert!(stats.will_fail);
    }

    #[test]
    fn exactly_twenty_percent_does_not_fail() {
        let events = vec![AbsenceKind::WithoutExcuse; 2];
        let stats = compute_stats(&events, 10);
        assert_eq!(stats.percentage, 20.0);
        assert!(!stats.will_fail);
    }

    #[test]
    fn zero_sessions_returns_all_zero_stats() {
        let events = vec![AbsenceKind::WithoutExcuse; 5];
        let stats = compute_stats(&events, 0);
        assert_eq!(stats, AbsenceStats::default());
        assert!(!stats.will_fail);
    }

    #[test]
    fn deduction_follows_per_kind_weights() {
        let events = [
            AbsenceKind::WithExcuse,
            AbsenceKind::WithExcuse,
            AbsenceKind::WithoutExcuse,
            AbsenceKind::Bereavement,
            AbsenceKind::BeyondControl,
        ];
        let stats = compute_stats(&events, 30);
        // 0.25 + 0.25 + 0.50 + 0 + 0.25
        assert_eq!(stats.attendance_deduction, 1.25);
    }

    #[test]
    fn bereavement_and_beyond_control_count_as_excused() {
        let events = [AbsenceKind::Bereavement, AbsenceKind::BeyondControl, AbsenceKind::WithoutExcuse];
        let stats = compute_stats(&events, 30);
        assert_eq!(stats.total_absences, 3);
        assert_eq!(stats.with_excuse, 2);
        assert_eq!(stats.without_excuse, 1);
    }
}
