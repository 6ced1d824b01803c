//! Driving ports for the completion workflow.

use async_trait::async_trait;

use crate::domain::{
    CompletionActor, CompletionProgress, EmployerId, Error, JobId, MatchId, StudentId,
};

/// Confirms completion on behalf of one party.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionCommand: Send + Sync {
    /// The student confirms the work was done.
    ///
    /// # Errors
    ///
    /// `not_found` when the match does not exist on `job_id`; `forbidden`
    /// when `student_id` is not the match's student.
    async fn mark_student_complete(
        &self,
        match_id: MatchId,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<CompletionProgress, Error>;

    /// The employer confirms the work was done.
    ///
    /// # Errors
    ///
    /// `not_found` when the match does not exist on `job_id`; `forbidden`
    /// when `employer_id` does not own the job.
    async fn mark_employer_complete(
        &self,
        match_id: MatchId,
        employer_id: EmployerId,
        job_id: JobId,
    ) -> Result<CompletionProgress, Error>;
}

/// Reads confirmation progress for either party.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionQuery: Send + Sync {
    /// Current flags and status of the match.
    ///
    /// # Errors
    ///
    /// `not_found` when the match does not exist on `job_id`; `forbidden`
    /// for callers that are not a party.
    async fn get_progress(
        &self,
        match_id: MatchId,
        job_id: JobId,
        viewer: CompletionActor,
    ) -> Result<CompletionProgress, Error>;
}
