//! Driven port for reading jobs owned by the job catalogue.

use async_trait::async_trait;

use crate::domain::{JobId, JobRef};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job directory adapters.
    pub enum JobDirectoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "job directory connection failed: {message}" as service_unavailable,
        /// A query failed.
        Query { message: String } =>
            "job directory query failed: {message}" as internal,
    }
}

/// Read access to jobs. Returns `None` for unknown ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobDirectory: Send + Sync {
    /// Look up a job and its owner.
    async fn find_job(&self, job_id: JobId) -> Result<Option<JobRef>, JobDirectoryError>;
}
