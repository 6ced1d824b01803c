//! PostgreSQL-backed `JobDirectory` reading the jobs table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobDirectory, JobDirectoryError};
use crate::domain::{JobId, JobRef};

use super::error_mapping;
use super::models::JobRow;
use super::pool::DbPool;
use super::schema::jobs;

/// Diesel-backed implementation of the `JobDirectory` port.
#[derive(Clone)]
pub struct DieselJobDirectory {
    pool: DbPool,
}

impl DieselJobDirectory {
    /// Create a new directory with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobDirectory for DieselJobDirectory {
    async fn find_job(&self, job_id: JobId) -> Result<Option<JobRef>, JobDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| error_mapping::map_pool_error(err, JobDirectoryError::connection))?;
        let row = jobs::table
            .find(job_id.get())
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                error_mapping::map_diesel_error(
                    err,
                    JobDirectoryError::query,
                    JobDirectoryError::connection,
                )
            })?;
        row.map(JobRef::try_from)
            .transpose()
            .map_err(|err| error_mapping::map_corrupt_row(&err, JobDirectoryError::query))
    }
}
