//! Matches between a student and an employer on a job, and the completion
//! status derived from their confirmation flags.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{EmployerId, JobId, MatchId, StudentId, Subject};
use super::identity::Role;

/// Completion status of a match.
///
/// The status is a pure function of the two confirmation flags, except that
/// [`MatchStatus::Completed`] is terminal once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchStatus {
    /// Neither party has confirmed.
    #[default]
    Pending,
    /// The student confirmed; waiting on the employer.
    AwaitingEmployer,
    /// The employer confirmed; waiting on the student.
    AwaitingStudent,
    /// Both parties confirmed.
    Completed,
}

impl MatchStatus {
    /// Persisted literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AwaitingEmployer => "awaiting_employer",
            Self::AwaitingStudent => "awaiting_student",
            Self::Completed => "completed",
        }
    }

    /// Read a stored literal.
    ///
    /// Rows written before the canonical literals existed carry Spanish
    /// values or nothing at all; those are mapped onto the closed set and any
    /// remaining unknown value reads as pending so the flags decide.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "awaiting_employer" | "pendiente_confirmacion_empleador" => Self::AwaitingEmployer,
            "awaiting_student" | "pendiente_confirmacion_estudiante" => Self::AwaitingStudent,
            "completed" | "completado" => Self::Completed,
            _ => Self::Pending,
        }
    }

    /// Derive the status from the confirmation flags.
    ///
    /// # Examples
    /// ```
    /// use matchwork::domain::MatchStatus;
    ///
    /// assert_eq!(MatchStatus::Pending.reconcile(true, false), MatchStatus::AwaitingEmployer);
    /// assert_eq!(MatchStatus::Completed.reconcile(false, false), MatchStatus::Completed);
    /// ```
    #[must_use]
    pub const fn reconcile(self, student_completed: bool, employer_completed: bool) -> Self {
        if matches!(self, Self::Completed) {
            return Self::Completed;
        }
        match (student_completed, employer_completed) {
            (true, true) => Self::Completed,
            (true, false) => Self::AwaitingEmployer,
            (false, true) => Self::AwaitingStudent,
            (false, false) => Self::Pending,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Natural key of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchKey {
    /// Student side.
    pub student_id: StudentId,
    /// Employer side; the owner of `job_id`.
    pub employer_id: EmployerId,
    /// Job the two parties matched on.
    pub job_id: JobId,
}

/// Mutual interest between a student and an employer for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Store-assigned identifier.
    pub id: MatchId,
    /// Student side.
    pub student_id: StudentId,
    /// Employer side.
    pub employer_id: EmployerId,
    /// Job matched on.
    pub job_id: JobId,
    /// Set once both parties liked each other; never cleared.
    pub is_match: bool,
    /// Student confirmed the work was done.
    pub student_completed: bool,
    /// Employer confirmed the work was done.
    pub employer_completed: bool,
    /// Completion status, reconciled with the flags.
    pub status: MatchStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Natural key of this match.
    #[must_use]
    pub const fn key(&self) -> MatchKey {
        MatchKey {
            student_id: self.student_id,
            employer_id: self.employer_id,
            job_id: self.job_id,
        }
    }

    /// Recompute `status` from the flags.
    #[must_use]
    pub fn reconciled(mut self) -> Self {
        self.status = self
            .status
            .reconcile(self.student_completed, self.employer_completed);
        self
    }

    /// Whether `subject` is the student or the employer on this match.
    #[must_use]
    pub fn involves(&self, subject: &Subject) -> bool {
        match subject.role() {
            Role::Student => self.student_id.get() == subject.id(),
            Role::Employer => self.employer_id.get() == subject.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, MatchStatus::Pending)]
    #[case(true, false, MatchStatus::AwaitingEmployer)]
    #[case(false, true, MatchStatus::AwaitingStudent)]
    #[case(true, true, MatchStatus::Completed)]
    fn reconcile_follows_flags(
        #[case] student: bool,
        #[case] employer: bool,
        #[case] expected: MatchStatus,
    ) {
        assert_eq!(MatchStatus::Pending.reconcile(student, employer), expected);
        assert_eq!(MatchStatus::AwaitingStudent.reconcile(student, employer), expected);
    }

    #[rstest]
    #[case(false, false)]
    #[case(true, false)]
    fn completed_is_terminal(#[case] student: bool, #[case] employer: bool) {
        assert_eq!(
            MatchStatus::Completed.reconcile(student, employer),
            MatchStatus::Completed
        );
    }

    #[rstest]
    #[case(None, MatchStatus::Pending)]
    #[case(Some(""), MatchStatus::Pending)]
    #[case(Some("en_progreso"), MatchStatus::Pending)]
    #[case(Some("pending"), MatchStatus::Pending)]
    #[case(Some("pendiente_confirmacion_empleador"), MatchStatus::AwaitingEmployer)]
    #[case(Some("awaiting_employer"), MatchStatus::AwaitingEmployer)]
    #[case(Some("pendiente_confirmacion_estudiante"), MatchStatus::AwaitingStudent)]
    #[case(Some("completado"), MatchStatus::Completed)]
    #[case(Some("completed"), MatchStatus::Completed)]
    fn reads_stored_literals(#[case] raw: Option<&str>, #[case] expected: MatchStatus) {
        assert_eq!(MatchStatus::from_stored(raw), expected);
    }

    #[test]
    fn reconciled_heals_stale_status() {
        let now = Utc::now();
        let stale = Match {
            id: MatchId::new(1).expect("id"),
            student_id: StudentId::new(7).expect("id"),
            employer_id: EmployerId::new(3).expect("id"),
            job_id: JobId::new(42).expect("id"),
            is_match: true,
            student_completed: true,
            employer_completed: false,
            status: MatchStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(stale.reconciled().status, MatchStatus::AwaitingEmployer);
    }
}
