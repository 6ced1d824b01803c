//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` and only see
//! domain ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CompletionCommand, CompletionQuery, IdentityVerifier, InterestCommand, InterestQuery,
    MatchQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Verifies bearer credentials.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Records likes and dislikes.
    pub interests: Arc<dyn InterestCommand>,
    /// Reads liked jobs and pending likes.
    pub interests_query: Arc<dyn InterestQuery>,
    /// Reads matches.
    pub matches: Arc<dyn MatchQuery>,
    /// Confirms completion.
    pub completion: Arc<dyn CompletionCommand>,
    /// Reads completion progress.
    pub completion_query: Arc<dyn CompletionQuery>,
}

/// Parameter object for [`HttpState::new`].
#[derive(Clone)]
pub struct HttpStatePorts {
    /// See [`HttpState::identity`].
    pub identity: Arc<dyn IdentityVerifier>,
    /// See [`HttpState::interests`].
    pub interests: Arc<dyn InterestCommand>,
    /// See [`HttpState::interests_query`].
    pub interests_query: Arc<dyn InterestQuery>,
    /// See [`HttpState::matches`].
    pub matches: Arc<dyn MatchQuery>,
    /// See [`HttpState::completion`].
    pub completion: Arc<dyn CompletionCommand>,
    /// See [`HttpState::completion_query`].
    pub completion_query: Arc<dyn CompletionQuery>,
}

impl HttpState {
    /// Assemble handler state from port implementations.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            interests,
            interests_query,
            matches,
            completion,
            completion_query,
        } = ports;
        Self {
            identity,
            interests,
            interests_query,
            matches,
            completion,
            completion_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
