//! PostgreSQL-backed `InterestRepository` implementation using Diesel ORM.
//!
//! Both interest tables are keyed by the natural tuple, so re-submission is an
//! `INSERT ... ON CONFLICT DO UPDATE` that overwrites `interested` and
//! `recorded_at`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InterestRepository, InterestRepositoryError};
use crate::domain::{
    EmployerId, EmployerInterest, IdValidationError, JobId, StudentId, StudentInterest,
};

use super::error_mapping;
use super::models::{EmployerInterestRow, StudentInterestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{employer_interests, jobs, matches, student_interests};

/// Diesel-backed implementation of the `InterestRepository` port.
#[derive(Clone)]
pub struct DieselInterestRepository {
    pool: DbPool,
}

impl DieselInterestRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InterestRepositoryError {
    error_mapping::map_pool_error(error, InterestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InterestRepositoryError {
    error_mapping::map_diesel_error(
        error,
        InterestRepositoryError::query,
        InterestRepositoryError::connection,
    )
}

fn map_corrupt_row(error: IdValidationError) -> InterestRepositoryError {
    error_mapping::map_corrupt_row(&error, InterestRepositoryError::query)
}

fn into_student_interests(
    rows: Vec<StudentInterestRow>,
) -> Result<Vec<StudentInterest>, InterestRepositoryError> {
    rows.into_iter()
        .map(|row| StudentInterest::try_from(row).map_err(map_corrupt_row))
        .collect()
}

#[async_trait]
impl InterestRepository for DieselInterestRepository {
    async fn upsert_student_interest(
        &self,
        interest: &StudentInterest,
    ) -> Result<(), InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = StudentInterestRow::from(interest);

        diesel::insert_into(student_interests::table)
            .values(&row)
            .on_conflict((student_interests::student_id, student_interests::job_id))
            .do_update()
            .set((
                student_interests::interested.eq(excluded(student_interests::interested)),
                student_interests::recorded_at.eq(excluded(student_interests::recorded_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn upsert_employer_interest(
        &self,
        interest: &EmployerInterest,
    ) -> Result<(), InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = EmployerInterestRow::from(interest);

        diesel::insert_into(employer_interests::table)
            .values(&row)
            .on_conflict((
                employer_interests::employer_id,
                employer_interests::student_id,
                employer_interests::job_id,
            ))
            .do_update()
            .set((
                employer_interests::interested.eq(excluded(employer_interests::interested)),
                employer_interests::recorded_at.eq(excluded(employer_interests::recorded_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_student_interest(
        &self,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<Option<StudentInterest>, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = student_interests::table
            .find((student_id.get(), job_id.get()))
            .select(StudentInterestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(StudentInterest::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn find_employer_interest(
        &self,
        employer_id: EmployerId,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<Option<EmployerInterest>, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = employer_interests::table
            .find((employer_id.get(), student_id.get(), job_id.get()))
            .select(EmployerInterestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(EmployerInterest::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn list_liked_jobs(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentInterest>, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = student_interests::table
            .filter(student_interests::student_id.eq(student_id.get()))
            .filter(student_interests::interested.eq(true))
            .order(student_interests::recorded_at.desc())
            .select(StudentInterestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_student_interests(rows)
    }

    async fn list_pending_likes(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<StudentInterest>, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = student_interests::table
            .inner_join(jobs::table)
            .left_join(
                matches::table.on(matches::student_id
                    .eq(student_interests::student_id)
                    .and(matches::job_id.eq(student_interests::job_id))
                    .and(matches::employer_id.eq(jobs::employer_id))
                    .and(matches::is_match.eq(true))),
            )
            .filter(jobs::employer_id.eq(employer_id.get()))
            .filter(student_interests::interested.eq(true))
            .filter(matches::id.is_null())
            .order(student_interests::recorded_at.desc())
            .select(StudentInterestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_student_interests(rows)
    }
}
