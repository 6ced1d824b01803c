//! PostgreSQL-backed `CompletionRepository` implementation using Diesel ORM.
//!
//! A confirmation locks the match row with `SELECT ... FOR UPDATE`, writes
//! the flag and reconciled status when either changed, and closes the job
//! when the completion policy allows. All three writes share one transaction, so concurrent
//! confirmations on the same match serialise on the row lock and converge.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{CompletionRepository, CompletionRepositoryError};
use crate::domain::{
    CompletionActor, CompletionApply, CompletionSnapshot, EmployerId, IdValidationError, JobId,
    JobCompletionPolicy, JobStatus, MatchId, MatchStatus, StudentId,
};

use super::error_mapping;
use super::pool::{DbPool, PoolError};
use super::schema::{jobs, matches};

/// Diesel-backed implementation of the `CompletionRepository` port.
#[derive(Clone)]
pub struct DieselCompletionRepository {
    pool: DbPool,
}

impl DieselCompletionRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures inside the completion transaction.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    CorruptRow(IdValidationError),
}

impl From<diesel::result::Error> for TxError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

fn map_pool_error(error: PoolError) -> CompletionRepositoryError {
    error_mapping::map_pool_error(error, CompletionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CompletionRepositoryError {
    error_mapping::map_diesel_error(
        error,
        CompletionRepositoryError::query,
        CompletionRepositoryError::connection,
    )
}

fn map_tx_error(error: TxError) -> CompletionRepositoryError {
    match error {
        TxError::Diesel(err) => map_diesel_error(err),
        TxError::CorruptRow(err) => {
            error_mapping::map_corrupt_row(&err, CompletionRepositoryError::query)
        }
    }
}

type SnapshotColumns = (
    matches::id,
    matches::job_id,
    matches::student_id,
    jobs::employer_id,
    matches::student_completed,
    matches::employer_completed,
    matches::status,
);

const SNAPSHOT_COLUMNS: SnapshotColumns = (
    matches::id,
    matches::job_id,
    matches::student_id,
    jobs::employer_id,
    matches::student_completed,
    matches::employer_completed,
    matches::status,
);

type SnapshotRow = (i64, i64, i64, i64, bool, bool, Option<String>);

fn snapshot_from_row(row: SnapshotRow) -> Result<CompletionSnapshot, IdValidationError> {
    let (match_id, job_id, student_id, job_owner, student_completed, employer_completed, status) =
        row;
    Ok(CompletionSnapshot {
        match_id: MatchId::new(match_id)?,
        job_id: JobId::new(job_id)?,
        student_id: StudentId::new(student_id)?,
        job_owner: EmployerId::new(job_owner)?,
        student_completed,
        employer_completed,
        status: MatchStatus::from_stored(status.as_deref()),
    })
}

/// Read the snapshot, optionally locking the match and job rows.
///
/// Locking the job row as well serialises confirmations across sibling
/// matches, so the open-match count used by the completion policy is stable.
async fn select_snapshot(
    conn: &mut AsyncPgConnection,
    match_id: MatchId,
    job_id: JobId,
    lock: bool,
) -> Result<Option<CompletionSnapshot>, TxError> {
    let query = matches::table
        .inner_join(jobs::table)
        .filter(matches::id.eq(match_id.get()))
        .filter(matches::job_id.eq(job_id.get()))
        .filter(matches::is_match.eq(true))
        .select(SNAPSHOT_COLUMNS);

    let row: Option<SnapshotRow> = if lock {
        query.for_update().first(conn).await.optional()?
    } else {
        query.first(conn).await.optional()?
    };

    row.map(snapshot_from_row)
        .transpose()
        .map_err(TxError::CorruptRow)
}

/// Count other mutual matches on the job that are not yet completed.
async fn count_open_matches(
    conn: &mut AsyncPgConnection,
    job_id: JobId,
    excluding: MatchId,
) -> Result<u64, TxError> {
    let remaining: i64 = matches::table
        .filter(matches::job_id.eq(job_id.get()))
        .filter(matches::id.ne(excluding.get()))
        .filter(matches::is_match.eq(true))
        .filter(
            matches::student_completed
                .eq(false)
                .or(matches::employer_completed.eq(false)),
        )
        .count()
        .get_result(conn)
        .await?;
    Ok(u64::try_from(remaining).unwrap_or_default())
}

async fn apply_confirmation(
    conn: &mut AsyncPgConnection,
    match_id: MatchId,
    job_id: JobId,
    actor: CompletionActor,
    policy: JobCompletionPolicy,
) -> Result<CompletionApply, TxError> {
    let Some(snapshot) = select_snapshot(conn, match_id, job_id, true).await? else {
        return Ok(CompletionApply::MatchNotFound);
    };
    if !snapshot.is_party(actor) {
        return Ok(CompletionApply::NotAParty);
    }

    let updated = snapshot.confirm(actor);
    let now = chrono::Utc::now();
    if updated == snapshot {
        debug!(%match_id, "confirmation already recorded");
    } else {
        diesel::update(matches::table.find(match_id.get()))
            .set((
                matches::student_completed.eq(updated.student_completed),
                matches::employer_completed.eq(updated.employer_completed),
                matches::status.eq(Some(updated.status.as_str())),
                matches::updated_at.eq(now),
            ))
            .execute(conn)
            .await?;
    }

    let mut job_completed = false;
    if updated.status == MatchStatus::Completed {
        let remaining = count_open_matches(conn, job_id, match_id).await?;
        if policy.should_complete_job(remaining) {
            let changed = diesel::update(jobs::table.find(job_id.get()))
                .filter(jobs::status.ne(JobStatus::Completed.as_str()))
                .set((
                    jobs::status.eq(JobStatus::Completed.as_str()),
                    jobs::updated_at.eq(now),
                ))
                .execute(conn)
                .await?;
            job_completed = changed > 0;
        } else {
            debug!(%job_id, remaining, "job stays open until its other matches complete");
        }
    }

    Ok(CompletionApply::Applied {
        progress: updated.progress(),
        job_completed,
    })
}

#[async_trait]
impl CompletionRepository for DieselCompletionRepository {
    async fn load_snapshot(
        &self,
        match_id: MatchId,
        job_id: JobId,
    ) -> Result<Option<CompletionSnapshot>, CompletionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        select_snapshot(&mut conn, match_id, job_id, false)
            .await
            .map_err(map_tx_error)
    }

    async fn confirm(
        &self,
        match_id: MatchId,
        job_id: JobId,
        actor: CompletionActor,
        policy: JobCompletionPolicy,
    ) -> Result<CompletionApply, CompletionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, TxError, _>(|conn| {
            async move { apply_confirmation(conn, match_id, job_id, actor, policy).await }
                .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn snapshot_rows_reconcile_legacy_status() {
        let snapshot = snapshot_from_row((12, 42, 7, 3, true, false, Some("en_progreso".to_owned())))
            .expect("valid row");
        assert_eq!(snapshot.status, MatchStatus::Pending);
        assert_eq!(snapshot.progress().status, MatchStatus::AwaitingEmployer);
        assert_eq!(snapshot.job_owner.get(), 3);
    }

    #[rstest]
    fn corrupt_snapshot_rows_map_to_query_errors() {
        let err = snapshot_from_row((12, 0, 7, 3, false, false, None))
            .map_err(TxError::CorruptRow)
            .map_err(map_tx_error)
            .expect_err("zero job id");
        assert!(matches!(err, CompletionRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rollback_surfaces_as_query_error() {
        let err = map_tx_error(TxError::Diesel(diesel::result::Error::RollbackTransaction));
        assert_eq!(err, CompletionRepositoryError::query("database error"));
    }
}
