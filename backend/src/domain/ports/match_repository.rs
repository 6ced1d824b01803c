//! Driven port for match persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EmployerId, Match, MatchId, MatchKey, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by match repository adapters.
    pub enum MatchRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "match repository connection failed: {message}" as service_unavailable,
        /// A query or mutation failed.
        Query { message: String } =>
            "match repository query failed: {message}" as internal,
    }
}

/// Storage for match rows.
///
/// Adapters must enforce uniqueness of `(student, employer, job)` in the
/// store itself; [`MatchRepository::promote`] relies on it to stay race free.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert the match with `is_match = true`, or set `is_match = true` on
    /// the existing row for `key`. Returns the row as stored.
    async fn promote(&self, key: &MatchKey, at: DateTime<Utc>)
    -> Result<Match, MatchRepositoryError>;

    /// Fetch a match by id.
    async fn find_by_id(&self, id: MatchId) -> Result<Option<Match>, MatchRepositoryError>;

    /// Fetch a match by natural key.
    async fn find_by_key(&self, key: &MatchKey) -> Result<Option<Match>, MatchRepositoryError>;

    /// Mutual matches of a student, newest first.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Match>, MatchRepositoryError>;

    /// Mutual matches of an employer, newest first.
    async fn list_for_employer(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<Match>, MatchRepositoryError>;
}
