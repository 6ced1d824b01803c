//! Driving port for recording interest.

use async_trait::async_trait;

use crate::domain::{EmployerInterestRequest, Error, InterestOutcome, StudentInterestRequest};

/// Records likes and dislikes and derives matches synchronously.
///
/// When the stored stance is a like, implementations attempt match
/// derivation before returning so callers learn about a new match in the
/// same response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestCommand: Send + Sync {
    /// Record a student's stance on a job.
    ///
    /// # Errors
    ///
    /// `not_found` when the job does not exist; `service_unavailable` or
    /// `internal_error` when storage fails.
    async fn record_student_interest(
        &self,
        request: StudentInterestRequest,
    ) -> Result<InterestOutcome, Error>;

    /// Record an employer's stance on a student for one of their jobs.
    ///
    /// # Errors
    ///
    /// `not_found` when the job does not exist; `forbidden` when the job
    /// belongs to another employer; storage failures as above.
    async fn record_employer_interest(
        &self,
        request: EmployerInterestRequest,
    ) -> Result<InterestOutcome, Error>;
}
