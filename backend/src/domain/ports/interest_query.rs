//! Driving port for reading interest.

use async_trait::async_trait;

use crate::domain::{EmployerId, Error, StudentId, StudentInterest};

/// Read side of the interest ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestQuery: Send + Sync {
    /// Jobs the student currently likes.
    async fn list_liked_jobs(&self, student_id: StudentId) -> Result<Vec<StudentInterest>, Error>;

    /// Students who liked one of the employer's jobs and are not matched on
    /// it yet.
    async fn list_pending_likes(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<StudentInterest>, Error>;
}
