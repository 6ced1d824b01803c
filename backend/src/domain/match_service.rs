//! Match registry service implementing [`MatchQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{MatchQuery, MatchRepository};
use crate::domain::{EmployerId, Error, Match, MatchId, MatchKey, MatchStatus, StudentId};

/// Read-only view over stored matches.
///
/// Only rows with `is_match = true` are visible and every status is
/// recomputed from the flags on the way out.
pub struct MatchRegistryService<M> {
    matches: Arc<M>,
}

impl<M> Clone for MatchRegistryService<M> {
    fn clone(&self) -> Self {
        Self {
            matches: Arc::clone(&self.matches),
        }
    }
}

impl<M> MatchRegistryService<M> {
    /// Create a registry over the match repository.
    pub const fn new(matches: Arc<M>) -> Self {
        Self { matches }
    }
}

fn visible(rows: Vec<Match>) -> Vec<Match> {
    rows.into_iter()
        .filter(|row| row.is_match)
        .map(Match::reconciled)
        .collect()
}

#[async_trait]
impl<M> MatchQuery for MatchRegistryService<M>
where
    M: MatchRepository,
{
    async fn list_for_student(&self, student_id: StudentId) -> Result<Vec<Match>, Error> {
        self.matches
            .list_for_student(student_id)
            .await
            .map(visible)
            .map_err(Error::from)
    }

    async fn list_for_employer(&self, employer_id: EmployerId) -> Result<Vec<Match>, Error> {
        self.matches
            .list_for_employer(employer_id)
            .await
            .map(visible)
            .map_err(Error::from)
    }

    async fn get_match(&self, match_id: MatchId) -> Result<Match, Error> {
        self.matches
            .find_by_id(match_id)
            .await
            .map_err(Error::from)?
            .filter(|row| row.is_match)
            .map(Match::reconciled)
            .ok_or_else(|| Error::not_found(format!("match {match_id} does not exist")))
    }

    async fn has_completed_match(&self, key: MatchKey) -> Result<bool, Error> {
        let found = self
            .matches
            .find_by_key(&key)
            .await
            .map_err(Error::from)?;
        Ok(found
            .filter(|row| row.is_match)
            .map(Match::reconciled)
            .is_some_and(|row| row.status == MatchStatus::Completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, JobId};
    use crate::domain::ports::{MatchRepositoryError, MockMatchRepository};
    use chrono::Utc;
    use rstest::rstest;

    fn row(id: i64, is_match: bool, student_done: bool, employer_done: bool) -> Match {
        let now = Utc::now();
        Match {
            id: MatchId::new(id).expect("id"),
            student_id: StudentId::new(7).expect("id"),
            employer_id: EmployerId::new(3).expect("id"),
            job_id: JobId::new(42).expect("id"),
            is_match,
            student_completed: student_done,
            employer_completed: employer_done,
            status: MatchStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    fn registry(repo: MockMatchRepository) -> MatchRegistryService<MockMatchRepository> {
        MatchRegistryService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn lists_only_mutual_matches_with_healed_status() {
        let mut repo = MockMatchRepository::new();
        repo.expect_list_for_student()
            .return_once(|_| Ok(vec![row(1, true, true, false), row(2, false, false, false)]));

        let rows = registry(repo)
            .list_for_student(StudentId::new(7).expect("id"))
            .await
            .expect("listed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().map(|m| m.status), Some(MatchStatus::AwaitingEmployer));
    }

    #[tokio::test]
    async fn missing_match_is_not_found() {
        let mut repo = MockMatchRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let err = registry(repo)
            .get_match(MatchId::new(9).expect("id"))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true, true, true, true)]
    #[case(true, true, false, false)]
    #[case(false, true, true, false)]
    #[tokio::test]
    async fn completed_match_check(
        #[case] is_match: bool,
        #[case] student_done: bool,
        #[case] employer_done: bool,
        #[case] expected: bool,
    ) {
        let mut repo = MockMatchRepository::new();
        repo.expect_find_by_key()
            .return_once(move |_| Ok(Some(row(1, is_match, student_done, employer_done))));
        let key = row(1, true, false, false).key();

        let completed = registry(repo)
            .has_completed_match(key)
            .await
            .expect("checked");
        assert_eq!(completed, expected);
    }

    #[tokio::test]
    async fn store_outage_is_service_unavailable() {
        let mut repo = MockMatchRepository::new();
        repo.expect_list_for_employer()
            .return_once(|_| Err(MatchRepositoryError::connection("refused")));

        let err = registry(repo)
            .list_for_employer(EmployerId::new(3).expect("id"))
            .await
            .expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
