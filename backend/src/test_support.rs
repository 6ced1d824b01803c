//! Test utilities for the backend crate.
//!
//! [`InMemoryStore`] implements every persistence port with the same keying
//! and conflict rules as the PostgreSQL schema: interests upsert on their
//! natural key, matches are unique per `(student, employer, job)` and never
//! lose `is_match`, and a confirmation applies atomically under one lock.
//! It is compiled for unit tests and, through the `test-support` feature, for
//! the integration suites in `tests/`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;

use crate::domain::ports::{
    CompletionRepository, CompletionRepositoryError, IdentityVerifier, InterestRepository,
    InterestRepositoryError, JobDirectory, JobDirectoryError, MatchRepository,
    MatchRepositoryError,
};
use crate::domain::{
    CompletionActor, CompletionApply, CompletionSnapshot, CompletionWorkflowService, EmployerId,
    EmployerInterest, InterestLedgerService, JobCompletionPolicy, JobId, JobRef, JobStatus, Match,
    MatchId, MatchKey, MatchRegistryService, MatchStatus, StudentId, StudentInterest,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

#[derive(Default)]
struct StoreState {
    jobs: BTreeMap<JobId, JobRef>,
    student_interests: BTreeMap<(StudentId, JobId), StudentInterest>,
    employer_interests: BTreeMap<(EmployerId, StudentId, JobId), EmployerInterest>,
    matches: BTreeMap<MatchId, Match>,
    last_match_id: i64,
    unavailable: bool,
}

/// Failure raised by the store before it touches any data.
enum StoreFailure {
    Unavailable,
    Poisoned,
}

impl StoreFailure {
    fn into_port<E>(
        self,
        connection: impl FnOnce(&'static str) -> E,
        query: impl FnOnce(&'static str) -> E,
    ) -> E {
        match self {
            Self::Unavailable => connection("in-memory store marked unavailable"),
            Self::Poisoned => query("in-memory store lock poisoned"),
        }
    }
}

/// Shared in-memory stand-in for the PostgreSQL adapters.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreFailure> {
        let guard = self.state.lock().map_err(|_| StoreFailure::Poisoned)?;
        if guard.unavailable {
            return Err(StoreFailure::Unavailable);
        }
        Ok(guard)
    }

    fn lock_unchecked(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Publish an open job owned by `employer_id`.
    pub fn seed_job(&self, job_id: JobId, employer_id: EmployerId) {
        self.lock_unchecked().jobs.insert(
            job_id,
            JobRef {
                id: job_id,
                employer_id,
                status: JobStatus::Open,
            },
        );
    }

    /// Current status of a seeded job.
    #[must_use]
    pub fn job_status(&self, job_id: JobId) -> Option<JobStatus> {
        self.lock_unchecked().jobs.get(&job_id).map(|job| job.status)
    }

    /// Every stored match row, including rows without mutual interest.
    #[must_use]
    pub fn match_rows(&self) -> Vec<Match> {
        self.lock_unchecked().matches.values().cloned().collect()
    }

    /// Make every port call fail with a connection error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock_unchecked().unavailable = unavailable;
    }

    /// Build HTTP handler state whose services all read this store.
    #[must_use]
    pub fn http_state(
        self: &Arc<Self>,
        identity: Arc<dyn IdentityVerifier>,
        policy: JobCompletionPolicy,
    ) -> HttpState {
        let ledger = Arc::new(InterestLedgerService::new(
            Arc::clone(self),
            Arc::clone(self),
            Arc::clone(self),
            Arc::new(DefaultClock),
        ));
        let registry = Arc::new(MatchRegistryService::new(Arc::clone(self)));
        let completion = Arc::new(CompletionWorkflowService::new(Arc::clone(self), policy));
        HttpState::new(HttpStatePorts {
            identity,
            interests: ledger.clone(),
            interests_query: ledger,
            matches: registry,
            completion: completion.clone(),
            completion_query: completion,
        })
    }
}

fn interest_failure(failure: StoreFailure) -> InterestRepositoryError {
    failure.into_port(
        InterestRepositoryError::connection,
        InterestRepositoryError::query,
    )
}

fn match_failure(failure: StoreFailure) -> MatchRepositoryError {
    failure.into_port(MatchRepositoryError::connection, MatchRepositoryError::query)
}

fn job_failure(failure: StoreFailure) -> JobDirectoryError {
    failure.into_port(JobDirectoryError::connection, JobDirectoryError::query)
}

fn completion_failure(failure: StoreFailure) -> CompletionRepositoryError {
    failure.into_port(
        CompletionRepositoryError::connection,
        CompletionRepositoryError::query,
    )
}

fn sorted_newest_first(mut rows: Vec<StudentInterest>) -> Vec<StudentInterest> {
    rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    rows
}

#[async_trait]
impl InterestRepository for InMemoryStore {
    async fn upsert_student_interest(
        &self,
        interest: &StudentInterest,
    ) -> Result<(), InterestRepositoryError> {
        let mut state = self.lock().map_err(interest_failure)?;
        state
            .student_interests
            .insert((interest.student_id, interest.job_id), interest.clone());
        Ok(())
    }

    async fn upsert_employer_interest(
        &self,
        interest: &EmployerInterest,
    ) -> Result<(), InterestRepositoryError> {
        let mut state = self.lock().map_err(interest_failure)?;
        state.employer_interests.insert(
            (interest.employer_id, interest.student_id, interest.job_id),
            interest.clone(),
        );
        Ok(())
    }

    async fn find_student_interest(
        &self,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<Option<StudentInterest>, InterestRepositoryError> {
        let state = self.lock().map_err(interest_failure)?;
        Ok(state.student_interests.get(&(student_id, job_id)).cloned())
    }

    async fn find_employer_interest(
        &self,
        employer_id: EmployerId,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<Option<EmployerInterest>, InterestRepositoryError> {
        let state = self.lock().map_err(interest_failure)?;
        Ok(state
            .employer_interests
            .get(&(employer_id, student_id, job_id))
            .cloned())
    }

    async fn list_liked_jobs(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentInterest>, InterestRepositoryError> {
        let state = self.lock().map_err(interest_failure)?;
        let rows = state
            .student_interests
            .values()
            .filter(|row| row.student_id == student_id && row.interested)
            .cloned()
            .collect();
        Ok(sorted_newest_first(rows))
    }

    async fn list_pending_likes(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<StudentInterest>, InterestRepositoryError> {
        let state = self.lock().map_err(interest_failure)?;
        let rows = state
            .student_interests
            .values()
            .filter(|row| row.interested)
            .filter(|row| {
                state
                    .jobs
                    .get(&row.job_id)
                    .is_some_and(|job| job.employer_id == employer_id)
            })
            .filter(|row| {
                !state.matches.values().any(|found| {
                    found.is_match
                        && found.student_id == row.student_id
                        && found.employer_id == employer_id
                        && found.job_id == row.job_id
                })
            })
            .cloned()
            .collect();
        Ok(sorted_newest_first(rows))
    }
}

#[async_trait]
impl MatchRepository for InMemoryStore {
    async fn promote(
        &self,
        key: &MatchKey,
        at: DateTime<Utc>,
    ) -> Result<Match, MatchRepositoryError> {
        let mut state = self.lock().map_err(match_failure)?;
        if let Some(existing) = state.matches.values_mut().find(|row| row.key() == *key) {
            existing.is_match = true;
            existing.updated_at = at;
            return Ok(existing.clone());
        }

        state.last_match_id += 1;
        let id = MatchId::new(state.last_match_id)
            .map_err(|err| MatchRepositoryError::query(err.to_string()))?;
        let created = Match {
            id,
            student_id: key.student_id,
            employer_id: key.employer_id,
            job_id: key.job_id,
            is_match: true,
            student_completed: false,
            employer_completed: false,
            status: MatchStatus::Pending,
            created_at: at,
            updated_at: at,
        };
        state.matches.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: MatchId) -> Result<Option<Match>, MatchRepositoryError> {
        let state = self.lock().map_err(match_failure)?;
        Ok(state.matches.get(&id).cloned())
    }

    async fn find_by_key(&self, key: &MatchKey) -> Result<Option<Match>, MatchRepositoryError> {
        let state = self.lock().map_err(match_failure)?;
        Ok(state.matches.values().find(|row| row.key() == *key).cloned())
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let state = self.lock().map_err(match_failure)?;
        Ok(state
            .matches
            .values()
            .filter(|row| row.is_match && row.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_for_employer(
        &self,
        employer_id: EmployerId,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let state = self.lock().map_err(match_failure)?;
        Ok(state
            .matches
            .values()
            .filter(|row| row.is_match && row.employer_id == employer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl JobDirectory for InMemoryStore {
    async fn find_job(&self, job_id: JobId) -> Result<Option<JobRef>, JobDirectoryError> {
        let state = self.lock().map_err(job_failure)?;
        Ok(state.jobs.get(&job_id).cloned())
    }
}

fn snapshot(state: &StoreState, match_id: MatchId, job_id: JobId) -> Option<CompletionSnapshot> {
    let found = state
        .matches
        .get(&match_id)
        .filter(|row| row.is_match && row.job_id == job_id)?;
    let job = state.jobs.get(&job_id)?;
    Some(CompletionSnapshot {
        match_id,
        job_id,
        student_id: found.student_id,
        job_owner: job.employer_id,
        student_completed: found.student_completed,
        employer_completed: found.employer_completed,
        status: found.status,
    })
}

#[async_trait]
impl CompletionRepository for InMemoryStore {
    async fn load_snapshot(
        &self,
        match_id: MatchId,
        job_id: JobId,
    ) -> Result<Option<CompletionSnapshot>, CompletionRepositoryError> {
        let state = self.lock().map_err(completion_failure)?;
        Ok(snapshot(&state, match_id, job_id))
    }

    async fn confirm(
        &self,
        match_id: MatchId,
        job_id: JobId,
        actor: CompletionActor,
        policy: JobCompletionPolicy,
    ) -> Result<CompletionApply, CompletionRepositoryError> {
        let mut state = self.lock().map_err(completion_failure)?;
        let Some(current) = snapshot(&state, match_id, job_id) else {
            return Ok(CompletionApply::MatchNotFound);
        };
        if !current.is_party(actor) {
            return Ok(CompletionApply::NotAParty);
        }

        let updated = current.confirm(actor);
        if updated != current {
            if let Some(row) = state.matches.get_mut(&match_id) {
                row.student_completed = updated.student_completed;
                row.employer_completed = updated.employer_completed;
                row.status = updated.status;
                row.updated_at = Utc::now();
            }
        }

        let mut job_completed = false;
        if updated.status == MatchStatus::Completed {
            let remaining = state
                .matches
                .values()
                .filter(|row| row.job_id == job_id && row.id != match_id && row.is_match)
                .filter(|row| !(row.student_completed && row.employer_completed))
                .count();
            let remaining = u64::try_from(remaining).unwrap_or(u64::MAX);
            if policy.should_complete_job(remaining) {
                if let Some(job) = state.jobs.get_mut(&job_id) {
                    job_completed = job.status != JobStatus::Completed;
                    job.status = JobStatus::Completed;
                }
            }
        }

        Ok(CompletionApply::Applied {
            progress: updated.progress(),
            job_completed,
        })
    }
}
