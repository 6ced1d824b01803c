//! Match derivation from mutual interest.
//!
//! Derivation is idempotent: it only ever promotes a match to
//! `is_match = true`, and the store's unique key on
//! `(student, employer, job)` collapses concurrent promotions into one row.
//! Callers must commit the triggering interest before deriving so that two
//! likes racing from opposite sides always see each other in at least one
//! of the two derivation reads.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{InterestRepository, MatchRepository};
use crate::domain::{Error, Match, MatchKey};

/// Promotes a match when both parties have liked each other.
pub struct MatchDeriver<I, M> {
    interests: Arc<I>,
    matches: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<I, M> Clone for MatchDeriver<I, M> {
    fn clone(&self) -> Self {
        Self {
            interests: Arc::clone(&self.interests),
            matches: Arc::clone(&self.matches),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<I, M> MatchDeriver<I, M> {
    /// Create a deriver over the given repositories.
    pub fn new(interests: Arc<I>, matches: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            interests,
            matches,
            clock,
        }
    }
}

impl<I, M> MatchDeriver<I, M>
where
    I: InterestRepository,
    M: MatchRepository,
{
    /// Check both stances for `key` and promote the match if both are likes.
    ///
    /// Returns the stored match when one exists after the call, `None` when
    /// either side is missing or a dislike.
    pub async fn try_derive(&self, key: MatchKey) -> Result<Option<Match>, Error> {
        let student_side = self
            .interests
            .find_student_interest(key.student_id, key.job_id)
            .await
            .map_err(Error::from)?;
        if !student_side.is_some_and(|row| row.interested) {
            return Ok(None);
        }

        let employer_side = self
            .interests
            .find_employer_interest(key.employer_id, key.student_id, key.job_id)
            .await
            .map_err(Error::from)?;
        if !employer_side.is_some_and(|row| row.interested) {
            return Ok(None);
        }

        let promoted = self
            .matches
            .promote(&key, self.clock.utc())
            .await
            .map_err(Error::from)?;
        info!(
            match_id = %promoted.id,
            student_id = %key.student_id,
            employer_id = %key.employer_id,
            job_id = %key.job_id,
            "mutual interest promoted to match"
        );
        Ok(Some(promoted.reconciled()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        InterestRepositoryError, MockInterestRepository, MockMatchRepository,
    };
    use crate::domain::{
        EmployerId, EmployerInterest, ErrorCode, JobId, MatchId, MatchStatus, StudentId,
        StudentInterest,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn key() -> MatchKey {
        MatchKey {
            student_id: StudentId::new(7).expect("id"),
            employer_id: EmployerId::new(3).expect("id"),
            job_id: JobId::new(42).expect("id"),
        }
    }

    fn student_row(interested: bool) -> StudentInterest {
        StudentInterest {
            student_id: key().student_id,
            job_id: key().job_id,
            interested,
            recorded_at: at(),
        }
    }

    fn employer_row(interested: bool) -> EmployerInterest {
        EmployerInterest {
            employer_id: key().employer_id,
            student_id: key().student_id,
            job_id: key().job_id,
            interested,
            recorded_at: at(),
        }
    }

    fn stored_match() -> Match {
        Match {
            id: MatchId::new(11).expect("id"),
            student_id: key().student_id,
            employer_id: key().employer_id,
            job_id: key().job_id,
            is_match: true,
            student_completed: false,
            employer_completed: false,
            status: MatchStatus::Pending,
            created_at: at(),
            updated_at: at(),
        }
    }

    fn deriver(
        interests: MockInterestRepository,
        matches: MockMatchRepository,
    ) -> MatchDeriver<MockInterestRepository, MockMatchRepository> {
        MatchDeriver::new(Arc::new(interests), Arc::new(matches), Arc::new(DefaultClock))
    }

    #[tokio::test]
    async fn promotes_when_both_sides_like() {
        let mut interests = MockInterestRepository::new();
        interests
            .expect_find_student_interest()
            .times(1)
            .return_once(|_, _| Ok(Some(student_row(true))));
        interests
            .expect_find_employer_interest()
            .times(1)
            .return_once(|_, _, _| Ok(Some(employer_row(true))));
        let mut matches = MockMatchRepository::new();
        matches
            .expect_promote()
            .withf(|candidate, _| *candidate == key())
            .times(1)
            .return_once(|_, _| Ok(stored_match()));

        let derived = deriver(interests, matches)
            .try_derive(key())
            .await
            .expect("derivation succeeds");
        assert_eq!(derived.map(|m| m.id.get()), Some(11));
    }

    #[rstest]
    #[case(None, Some(true))]
    #[case(Some(false), Some(true))]
    #[case(Some(true), None)]
    #[case(Some(true), Some(false))]
    #[tokio::test]
    async fn no_match_without_mutual_like(
        #[case] student: Option<bool>,
        #[case] employer: Option<bool>,
    ) {
        let mut interests = MockInterestRepository::new();
        interests
            .expect_find_student_interest()
            .return_once(move |_, _| Ok(student.map(student_row)));
        interests
            .expect_find_employer_interest()
            .return_once(move |_, _, _| Ok(employer.map(employer_row)));
        let mut matches = MockMatchRepository::new();
        matches.expect_promote().times(0);

        let derived = deriver(interests, matches)
            .try_derive(key())
            .await
            .expect("derivation succeeds");
        assert!(derived.is_none());
    }

    #[tokio::test]
    async fn connection_failure_maps_to_service_unavailable() {
        let mut interests = MockInterestRepository::new();
        interests
            .expect_find_student_interest()
            .return_once(|_, _| Err(InterestRepositoryError::connection("pool timed out")));

        let err = deriver(interests, MockMatchRepository::new())
            .try_derive(key())
            .await
            .expect_err("store down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
