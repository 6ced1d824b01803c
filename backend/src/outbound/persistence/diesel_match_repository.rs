//! PostgreSQL-backed `MatchRepository` implementation using Diesel ORM.
//!
//! Promotion relies on the `(student_id, employer_id, job_id)` unique
//! constraint: concurrent derivations for the same triple collapse into one
//! row whose `is_match` is `true`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{MatchRepository, MatchRepositoryError};
use crate::domain::{EmployerId, IdValidationError, Match, MatchId, MatchKey, MatchStatus, StudentId};

use super::error_mapping;
use super::models::{MatchRow, NewMatchRow};
use super::pool::{DbPool, PoolError};
use super::schema::matches;

/// Diesel-backed implementation of the `MatchRepository` port.
#[derive(Clone)]
pub struct DieselMatchRepository {
    pool: DbPool,
}

impl DieselMatchRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MatchRepositoryError {
    error_mapping::map_pool_error(error, MatchRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MatchRepositoryError {
    error_mapping::map_diesel_error(
        error,
        MatchRepositoryError::query,
        MatchRepositoryError::connection,
    )
}

fn map_corrupt_row(error: IdValidationError) -> MatchRepositoryError {
    error_mapping::map_corrupt_row(&error, MatchRepositoryError::query)
}

fn into_matches(rows: Vec<MatchRow>) -> Result<Vec<Match>, MatchRepositoryError> {
    rows.into_iter()
        .map(|row| Match::try_from(row).map_err(map_corrupt_row))
        .collect()
}

#[async_trait]
impl MatchRepository for DieselMatchRepository {
    async fn promote(
        &self,
        key: &MatchKey,
        at: DateTime<Utc>,
    ) -> Result<Match, MatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewMatchRow {
            student_id: key.student_id.get(),
            employer_id: key.employer_id.get(),
            job_id: key.job_id.get(),
            is_match: true,
            status: Some(MatchStatus::Pending.as_str()),
            created_at: at,
            updated_at: at,
        };

        // Existing rows keep their completion flags and status.
        let row = diesel::insert_into(matches::table)
            .values(&new_row)
            .on_conflict((matches::student_id, matches::employer_id, matches::job_id))
            .do_update()
            .set((matches::is_match.eq(true), matches::updated_at.eq(at)))
            .returning(MatchRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(match_id = row.id, "match row upserted");
        Match::try_from(row).map_err(map_corrupt_row)
    }

    async fn find_by_id(&self, id: MatchId) -> Result<Option<Match>, MatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = matches::table
            .find(id.get())
            .select(MatchRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Match::try_from).transpose().map_err(map_corrupt_row)
    }

    async fn find_by_key(&self, key: &MatchKey) -> Result<Option<Match>, MatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = matches::table
            .filter(matches::student_id.eq(key.student_id.get()))
            .filter(matches::employer_id.eq(key.employer_id.get()))
            .filter(matches::job_id.eq(key.job_id.get()))
            .select(MatchRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Match::try_from).transpose().map_err(map_corrupt_row)
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = matches::table
            .filter(matches::student_id.eq(student_id.get()))
            .filter(matches::is_match.eq(true))
            .order(matches::created_at.desc())
            .select(MatchRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_matches(rows)
    }

    async fn list_for_employer(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = matches::table
            .filter(matches::employer_id.eq(employer_id.get()))
            .filter(matches::is_match.eq(true))
            .order(matches::created_at.desc())
            .select(MatchRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_matches(rows)
    }
}
