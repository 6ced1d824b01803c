//! Two-sided completion confirmation.
//!
//! A [`CompletionSnapshot`] is the slice of a match (plus the owner of its
//! job) needed to authorise and apply a confirmation. Adapters load it under
//! a row lock, call [`CompletionSnapshot::confirm`], and persist the result.

use super::{EmployerId, JobId, MatchId, MatchStatus, StudentId};

/// Party confirming completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionActor {
    /// The student on the match.
    Student(StudentId),
    /// The employer owning the job.
    Employer(EmployerId),
}

/// Confirmation state returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionProgress {
    /// Student has confirmed.
    pub student_done: bool,
    /// Employer has confirmed.
    pub employer_done: bool,
    /// Status derived from both flags.
    pub status: MatchStatus,
}

/// Match state relevant to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSnapshot {
    /// Match being confirmed.
    pub match_id: MatchId,
    /// Job referenced by the match.
    pub job_id: JobId,
    /// Student on the match.
    pub student_id: StudentId,
    /// Current owner of the job.
    pub job_owner: EmployerId,
    /// Student flag as stored.
    pub student_completed: bool,
    /// Employer flag as stored.
    pub employer_completed: bool,
    /// Status as stored.
    pub status: MatchStatus,
}

impl CompletionSnapshot {
    /// Whether `actor` may confirm or inspect this match.
    #[must_use]
    pub fn is_party(&self, actor: CompletionActor) -> bool {
        match actor {
            CompletionActor::Student(id) => id == self.student_id,
            CompletionActor::Employer(id) => id == self.job_owner,
        }
    }

    /// Set the actor's flag and reconcile the status.
    ///
    /// Idempotent: confirming twice yields the same snapshot. Callers check
    /// [`Self::is_party`] first.
    ///
    /// # Examples
    /// ```
    /// use matchwork::domain::{
    ///     CompletionActor, CompletionSnapshot, EmployerId, JobId, MatchId, MatchStatus, StudentId,
    /// };
    ///
    /// let snapshot = CompletionSnapshot {
    ///     match_id: MatchId::new(1).unwrap(),
    ///     job_id: JobId::new(42).unwrap(),
    ///     student_id: StudentId::new(7).unwrap(),
    ///     job_owner: EmployerId::new(3).unwrap(),
    ///     student_completed: false,
    ///     employer_completed: false,
    ///     status: MatchStatus::Pending,
    /// };
    /// let next = snapshot.confirm(CompletionActor::Student(StudentId::new(7).unwrap()));
    /// assert_eq!(next.status, MatchStatus::AwaitingEmployer);
    /// ```
    #[must_use]
    pub const fn confirm(mut self, actor: CompletionActor) -> Self {
        match actor {
            CompletionActor::Student(_) => self.student_completed = true,
            CompletionActor::Employer(_) => self.employer_completed = true,
        }
        self.status = self
            .status
            .reconcile(self.student_completed, self.employer_completed);
        self
    }

    /// Flags and status with the status reconciled.
    #[must_use]
    pub const fn progress(&self) -> CompletionProgress {
        CompletionProgress {
            student_done: self.student_completed,
            employer_done: self.employer_completed,
            status: self
                .status
                .reconcile(self.student_completed, self.employer_completed),
        }
    }
}

/// Result of applying a confirmation in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionApply {
    /// No match with that id references the given job.
    MatchNotFound,
    /// The caller is not a party; nothing was written.
    NotAParty,
    /// The confirmation was written.
    Applied {
        /// State after the write.
        progress: CompletionProgress,
        /// Whether this write closed the job.
        job_completed: bool,
    },
}
