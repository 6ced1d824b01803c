//! Driving port for reading matches.

use async_trait::async_trait;

use crate::domain::{EmployerId, Error, Match, MatchId, MatchKey, StudentId};

/// Read side of the match registry.
///
/// Every returned [`Match`] has its status reconciled with its flags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchQuery: Send + Sync {
    /// Mutual matches of a student.
    async fn list_for_student(&self, student_id: StudentId) -> Result<Vec<Match>, Error>;

    /// Mutual matches of an employer.
    async fn list_for_employer(&self, employer_id: EmployerId) -> Result<Vec<Match>, Error>;

    /// Fetch one match.
    ///
    /// # Errors
    ///
    /// `not_found` when no match has this id.
    async fn get_match(&self, match_id: MatchId) -> Result<Match, Error>;

    /// Whether the triple has a mutual match that both parties completed.
    /// Rating collaborators check this before accepting a rating.
    async fn has_completed_match(&self, key: MatchKey) -> Result<bool, Error>;
}
