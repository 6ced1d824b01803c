//! Driven port for interest persistence.

use async_trait::async_trait;

use crate::domain::{EmployerId, EmployerInterest, JobId, StudentId, StudentInterest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by interest repository adapters.
    pub enum InterestRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "interest repository connection failed: {message}" as service_unavailable,
        /// A query or mutation failed.
        Query { message: String } =>
            "interest repository query failed: {message}" as internal,
    }
}

/// Storage for student and employer interest rows.
///
/// Upserts insert the row or overwrite `interested` and `recorded_at` on the
/// natural key. Each upsert commits on its own so a subsequent read from any
/// connection observes it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestRepository: Send + Sync {
    /// Insert or overwrite the student's stance keyed on `(student, job)`.
    async fn upsert_student_interest(
        &self,
        interest: &StudentInterest,
    ) -> Result<(), InterestRepositoryError>;

    /// Insert or overwrite the employer's stance keyed on
    /// `(employer, student, job)`.
    async fn upsert_employer_interest(
        &self,
        interest: &EmployerInterest,
    ) -> Result<(), InterestRepositoryError>;

    /// Fetch the student's stance on a job.
    async fn find_student_interest(
        &self,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<Option<StudentInterest>, InterestRepositoryError>;

    /// Fetch the employer's stance on a student for a job.
    async fn find_employer_interest(
        &self,
        employer_id: EmployerId,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<Option<EmployerInterest>, InterestRepositoryError>;

    /// Jobs the student currently likes, most recent first.
    async fn list_liked_jobs(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentInterest>, InterestRepositoryError>;

    /// Student likes on the employer's jobs that have not become a match yet,
    /// most recent first.
    async fn list_pending_likes(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<StudentInterest>, InterestRepositoryError>;
}
