//! Interest records: one party's like or dislike of a counterpart for a job.

use chrono::{DateTime, Utc};

use super::{EmployerId, JobId, MatchId, StudentId};

/// A student's stance on a job. Unique per `(student_id, job_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInterest {
    /// Student expressing the stance.
    pub student_id: StudentId,
    /// Job the stance applies to.
    pub job_id: JobId,
    /// `true` for a like, `false` for a dislike.
    pub interested: bool,
    /// When the stance was last written.
    pub recorded_at: DateTime<Utc>,
}

/// An employer's stance on a student for one of their jobs. Unique per
/// `(employer_id, student_id, job_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerInterest {
    /// Employer expressing the stance.
    pub employer_id: EmployerId,
    /// Student the stance is about.
    pub student_id: StudentId,
    /// Job the stance applies to.
    pub job_id: JobId,
    /// `true` for a like, `false` for a dislike.
    pub interested: bool,
    /// When the stance was last written.
    pub recorded_at: DateTime<Utc>,
}

/// Student-side request to record a stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentInterestRequest {
    /// Acting student.
    pub student_id: StudentId,
    /// Target job.
    pub job_id: JobId,
    /// Like or dislike.
    pub interested: bool,
}

/// Employer-side request to record a stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployerInterestRequest {
    /// Acting employer; must own `job_id`.
    pub employer_id: EmployerId,
    /// Student being rated.
    pub student_id: StudentId,
    /// Target job.
    pub job_id: JobId,
    /// Like or dislike.
    pub interested: bool,
}

/// Result of recording an interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestOutcome {
    /// The stance was stored and no match resulted.
    Saved,
    /// The stance completed a mutual like.
    MatchFound {
        /// Match row that now carries `is_match = true`.
        match_id: MatchId,
    },
}

impl InterestOutcome {
    /// Whether a match was derived.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::MatchFound { .. })
    }
}
