//! Interest ledger service.
//!
//! Implements [`InterestCommand`] and [`InterestQuery`]. Each recorded like
//! is committed through the repository first and only then handed to the
//! [`MatchDeriver`]. The two steps must not share a transaction: a
//! concurrent like from the other party has to be visible to one of the
//! derivation reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::match_deriver::MatchDeriver;
use crate::domain::ports::{
    InterestCommand, InterestQuery, InterestRepository, JobDirectory, MatchRepository,
};
use crate::domain::{
    EmployerId, EmployerInterest, EmployerInterestRequest, Error, InterestOutcome, JobId, JobRef,
    MatchKey, StudentId, StudentInterest, StudentInterestRequest,
};

/// Records interest and derives matches.
pub struct InterestLedgerService<I, M, J> {
    interests: Arc<I>,
    jobs: Arc<J>,
    deriver: MatchDeriver<I, M>,
    clock: Arc<dyn Clock>,
}

impl<I, M, J> Clone for InterestLedgerService<I, M, J> {
    fn clone(&self) -> Self {
        Self {
            interests: Arc::clone(&self.interests),
            jobs: Arc::clone(&self.jobs),
            deriver: self.deriver.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<I, M, J> InterestLedgerService<I, M, J> {
    /// Create a ledger over the given adapters.
    pub fn new(interests: Arc<I>, matches: Arc<M>, jobs: Arc<J>, clock: Arc<dyn Clock>) -> Self {
        Self {
            deriver: MatchDeriver::new(Arc::clone(&interests), matches, Arc::clone(&clock)),
            interests,
            jobs,
            clock,
        }
    }
}

impl<I, M, J> InterestLedgerService<I, M, J>
where
    I: InterestRepository,
    M: MatchRepository,
    J: JobDirectory,
{
    async fn require_job(&self, job_id: JobId) -> Result<JobRef, Error> {
        self.jobs
            .find_job(job_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found(format!("job {job_id} does not exist")))
    }

    async fn derive(&self, key: MatchKey) -> Result<InterestOutcome, Error> {
        Ok(match self.deriver.try_derive(key).await? {
            Some(found) => InterestOutcome::MatchFound { match_id: found.id },
            None => InterestOutcome::Saved,
        })
    }
}

#[async_trait]
impl<I, M, J> InterestCommand for InterestLedgerService<I, M, J>
where
    I: InterestRepository,
    M: MatchRepository,
    J: JobDirectory,
{
    async fn record_student_interest(
        &self,
        request: StudentInterestRequest,
    ) -> Result<InterestOutcome, Error> {
        let job = self.require_job(request.job_id).await?;
        let row = StudentInterest {
            student_id: request.student_id,
            job_id: request.job_id,
            interested: request.interested,
            recorded_at: self.clock.utc(),
        };
        self.interests
            .upsert_student_interest(&row)
            .await
            .map_err(Error::from)?;

        if !request.interested {
            return Ok(InterestOutcome::Saved);
        }
        self.derive(MatchKey {
            student_id: request.student_id,
            employer_id: job.employer_id,
            job_id: request.job_id,
        })
        .await
    }

    async fn record_employer_interest(
        &self,
        request: EmployerInterestRequest,
    ) -> Result<InterestOutcome, Error> {
        let job = self.require_job(request.job_id).await?;
        if job.employer_id != request.employer_id {
            return Err(Error::forbidden(format!(
                "job {} belongs to another employer",
                request.job_id
            )));
        }
        let row = EmployerInterest {
            employer_id: request.employer_id,
            student_id: request.student_id,
            job_id: request.job_id,
            interested: request.interested,
            recorded_at: self.clock.utc(),
        };
        self.interests
            .upsert_employer_interest(&row)
            .await
            .map_err(Error::from)?;

        if !request.interested {
            return Ok(InterestOutcome::Saved);
        }
        self.derive(MatchKey {
            student_id: request.student_id,
            employer_id: request.employer_id,
            job_id: request.job_id,
        })
        .await
    }
}

#[async_trait]
impl<I, M, J> InterestQuery for InterestLedgerService<I, M, J>
where
    I: InterestRepository,
    M: MatchRepository,
    J: JobDirectory,
{
    async fn list_liked_jobs(&self, student_id: StudentId) -> Result<Vec<StudentInterest>, Error> {
        self.interests
            .list_liked_jobs(student_id)
            .await
            .map_err(Error::from)
    }

    async fn list_pending_likes(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<StudentInterest>, Error> {
        self.interests
            .list_pending_likes(employer_id)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "interest_service_tests.rs"]
mod tests;
