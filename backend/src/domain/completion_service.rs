//! Completion workflow service.
//!
//! Implements [`CompletionCommand`] and [`CompletionQuery`]. The state
//! machine itself lives in [`CompletionSnapshot::confirm`]; this service
//! turns repository outcomes into domain errors and logs job closures.
//!
//! [`CompletionSnapshot::confirm`]: crate::domain::CompletionSnapshot::confirm

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{CompletionCommand, CompletionQuery, CompletionRepository};
use crate::domain::{
    CompletionActor, CompletionApply, CompletionProgress, EmployerId, Error, JobCompletionPolicy,
    JobId, MatchId, StudentId,
};

/// Applies and reads two-sided completion confirmations.
pub struct CompletionWorkflowService<C> {
    repository: Arc<C>,
    policy: JobCompletionPolicy,
}

impl<C> Clone for CompletionWorkflowService<C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            policy: self.policy,
        }
    }
}

impl<C> CompletionWorkflowService<C> {
    /// Create the workflow with the job closure policy in force.
    pub const fn new(repository: Arc<C>, policy: JobCompletionPolicy) -> Self {
        Self { repository, policy }
    }
}

impl<C> CompletionWorkflowService<C>
where
    C: CompletionRepository,
{
    async fn mark(
        &self,
        match_id: MatchId,
        job_id: JobId,
        actor: CompletionActor,
    ) -> Result<CompletionProgress, Error> {
        let applied = self
            .repository
            .confirm(match_id, job_id, actor, self.policy)
            .await
            .map_err(Error::from)?;
        match applied {
            CompletionApply::MatchNotFound => Err(missing(match_id, job_id)),
            CompletionApply::NotAParty => Err(not_a_party(match_id)),
            CompletionApply::Applied {
                progress,
                job_completed,
            } => {
                if job_completed {
                    info!(%match_id, %job_id, "job completed by both parties");
                }
                Ok(progress)
            }
        }
    }
}

#[async_trait]
impl<C> CompletionCommand for CompletionWorkflowService<C>
where
    C: CompletionRepository,
{
    async fn mark_student_complete(
        &self,
        match_id: MatchId,
        student_id: StudentId,
        job_id: JobId,
    ) -> Result<CompletionProgress, Error> {
        self.mark(match_id, job_id, CompletionActor::Student(student_id))
            .await
    }

    async fn mark_employer_complete(
        &self,
        match_id: MatchId,
        employer_id: EmployerId,
        job_id: JobId,
    ) -> Result<CompletionProgress, Error> {
        self.mark(match_id, job_id, CompletionActor::Employer(employer_id))
            .await
    }
}

#[async_trait]
impl<C> CompletionQuery for CompletionWorkflowService<C>
where
    C: CompletionRepository,
{
    async fn get_progress(
        &self,
        match_id: MatchId,
        job_id: JobId,
        viewer: CompletionActor,
    ) -> Result<CompletionProgress, Error> {
        let snapshot = self
            .repository
            .load_snapshot(match_id, job_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| missing(match_id, job_id))?;
        if !snapshot.is_party(viewer) {
            return Err(not_a_party(match_id));
        }
        Ok(snapshot.progress())
    }
}

fn missing(match_id: MatchId, job_id: JobId) -> Error {
    Error::not_found(format!("match {match_id} on job {job_id} does not exist"))
}

fn not_a_party(match_id: MatchId) -> Error {
    Error::forbidden(format!("caller is not a party to match {match_id}"))
}
