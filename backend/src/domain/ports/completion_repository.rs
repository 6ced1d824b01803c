//! Driven port for the completion write path.

use async_trait::async_trait;

use crate::domain::{
    CompletionActor, CompletionApply, CompletionSnapshot, JobCompletionPolicy, JobId, MatchId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by completion repository adapters.
    pub enum CompletionRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "completion repository connection failed: {message}" as service_unavailable,
        /// A query or mutation failed; the transaction was rolled back.
        Query { message: String } =>
            "completion repository query failed: {message}" as internal,
    }
}

/// Atomic confirmation of match completion.
///
/// [`CompletionRepository::confirm`] must lock the match row, apply
/// [`CompletionSnapshot::confirm`], persist the flags and status and, when
/// the match completes and `policy` allows, mark the job completed. All of it
/// commits or none of it does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Read the mutual match `match_id` on `job_id` together with the job
    /// owner.
    async fn load_snapshot(
        &self,
        match_id: MatchId,
        job_id: JobId,
    ) -> Result<Option<CompletionSnapshot>, CompletionRepositoryError>;

    /// Record `actor`'s confirmation.
    async fn confirm(
        &self,
        match_id: MatchId,
        job_id: JobId,
        actor: CompletionActor,
        policy: JobCompletionPolicy,
    ) -> Result<CompletionApply, CompletionRepositoryError>;
}
