use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::core::time::format_primitive;
use crate::db::models::{Enrollment, SubjectMarks};
use crate::repositories;
use crate::services::attendance;
use crate::services::grading::scale::{self, ScaleVariant};
use crate::services::grading::score::{self, RawMarks};
use crate::services::notifications;

#[derive(Debug, Error)]
pub(crate) enum GradingError {
    #[error("{0}")]
    Validation(String),
    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Narrow read-modify-write seam over the enrollment store. Writers must
/// merge a single subject's sub-object; whole-record replacement is not part
/// of the contract, which keeps concurrent grading of sibling subjects safe.
#[async_trait]
pub(crate) trait EnrollmentMarksStore: Send + Sync {
    async fn read_for_merge(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error>;

    async fn write_merged(
        &self,
        student_id: &str,
        class_id: &str,
        subject_id: &str,
        marks: &SubjectMarks,
        now: PrimitiveDateTime,
    ) -> Result<(), sqlx::Error>;
}

pub(crate) struct PgMarksStore<'a> {
    pub(crate) pool: &'a PgPool,
}

#[async_trait]
impl EnrollmentMarksStore for PgMarksStore<'_> {
    async fn read_for_merge(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        repositories::enrollments::find_by_student_class(self.pool, student_id, class_id).await
    }

    async fn write_merged(
        &self,
        student_id: &str,
        class_id: &str,
        subject_id: &str,
        marks: &SubjectMarks,
        now: PrimitiveDateTime,
    ) -> Result<(), sqlx::Error> {
        repositories::enrollments::upsert_subject_marks(
            self.pool,
            &Uuid::new_v4().to_string(),
            student_id,
            class_id,
            subject_id,
            marks,
            now,
        )
        .await
    }
}

pub(crate) struct MarkSubmission<'a> {
    pub(crate) student_id: &'a str,
    pub(crate) subject_id: &'a str,
    pub(crate) class_id: &'a str,
    pub(crate) instructor_id: &'a str,
    pub(crate) raw: RawMarks,
}

#[derive(Debug, Clone)]
pub(crate) struct GradeOutcome {
    pub(crate) total_score: f64,
    pub(crate) letter_grade: String,
    pub(crate) points: f64,
    pub(crate) is_retake: bool,
    pub(crate) auto_failed: bool,
}

/// Run one grading pass: distribution -> weighted total -> absence override
/// -> scale resolution -> merged persistence -> student notification.
pub(crate) async fn submit_marks(
    pool: &PgPool,
    store: &dyn EnrollmentMarksStore,
    submission: MarkSubmission<'_>,
    now: PrimitiveDateTime,
) -> Result<GradeOutcome, GradingError> {
    validate_identifiers(&submission)?;

    let distribution = repositories::distributions::find_by_subject(pool, submission.subject_id)
        .await?
        .map(|row| score::Distribution::from(&row))
        .unwrap_or_default()
        .sanitized();

    let total_score = score::compute_total(&submission.raw, &distribution);

    let absence_kinds =
        repositories::absence_events::list_kinds(pool, submission.student_id, submission.subject_id)
            .await?;
    let total_sessions = repositories::subjects::find_by_id(pool, submission.subject_id)
        .await?
        .map(|subject| subject.total_sessions)
        .unwrap_or(0);
    let standing = attendance::compute_stats(&absence_kinds, total_sessions);

    let enrollment = store.read_for_merge(submission.student_id, submission.class_id).await?;
    let is_retake = enrollment
        .as_ref()
        .map(|record| {
            record.retake_subjects.0.iter().any(|subject| subject == submission.subject_id)
        })
        .unwrap_or(false);
    let previous = enrollment
        .as_ref()
        .and_then(|record| record.marks.0.get(submission.subject_id))
        .cloned();

    // The absence limit overrides any earned score; FA is assigned through
    // the administrative path, never through score resolution.
    let resolved = if standing.will_fail {
        scale::absence_failure()
    } else {
        let variant = if is_retake { ScaleVariant::Retake } else { ScaleVariant::Standard };
        scale::resolve(total_score, variant)
    };

    let now_text = format_primitive(now);
    let marks = SubjectMarks {
        midterm: score::clamp_score(submission.raw.midterm),
        final_exam: score::clamp_score(submission.raw.final_exam),
        homework: score::clamp_score(submission.raw.homework),
        labs: score::clamp_score(submission.raw.labs),
        quizzes: score::clamp_score(submission.raw.quizzes),
        participation: score::clamp_score(submission.raw.participation),
        attendance: score::clamp_score(submission.raw.attendance),
        total_score,
        letter_grade: resolved.grade.to_string(),
        points: resolved.points,
        is_retake,
        graded_by: submission.instructor_id.to_string(),
        created_at: previous.map(|existing| existing.created_at).unwrap_or_else(|| now_text.clone()),
        updated_at: now_text,
    };

    store
        .write_merged(submission.student_id, submission.class_id, submission.subject_id, &marks, now)
        .await?;

    let outcome_label = if standing.will_fail { "auto_failed" } else { "graded" };
    metrics::counter!("grade_submissions_total", "outcome" => outcome_label).increment(1);
    tracing::info!(
        student_id = submission.student_id,
        subject_id = submission.subject_id,
        class_id = submission.class_id,
        instructor_id = submission.instructor_id,
        total_score,
        grade = resolved.grade,
        "Marks submitted"
    );

    notifications::dispatch(
        pool,
        submission.student_id,
        "Grade posted",
        &format!("Your grade for subject {} is {}", submission.subject_id, resolved.grade),
        serde_json::json!({
            "subject_id": submission.subject_id,
            "class_id": submission.class_id,
            "total_score": total_score,
            "letter_grade": resolved.grade,
        }),
        now,
    )
    .await;

    Ok(GradeOutcome {
        total_score,
        letter_grade: resolved.grade.to_string(),
        points: resolved.points,
        is_retake,
        auto_failed: standing.will_fail,
    })
}

fn validate_identifiers(submission: &MarkSubmission<'_>) -> Result<(), GradingError> {
    for (field, value) in [
        ("student_id", submission.student_id),
        ("subject_id", submission.subject_id),
        ("class_id", submission.class_id),
    ] {
        if value.trim().is_empty() {
            return Err(GradingError::Validation(format!("{field} must not be empty")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission<'a>() -> MarkSubmission<'a> {
        MarkSubmission {
            student_id: "student-1",
            subject_id: "subject-1",
            class_id: "class-1",
            instructor_id: "instructor-1",
            raw: RawMarks::default(),
        }
    }

    #[test]
    fn identifiers_must_not_be_empty() {
        let mut bad = submission();
        bad.class_id = "  ";
        let err = validate_identifiers(&bad).expect_err("blank class id");
        assert!(matches!(err, GradingError::Validation(_)));
        assert!(err.to_string().contains("class_id"));

        assert!(validate_identifiers(&submission()).is_ok());
    }
}
