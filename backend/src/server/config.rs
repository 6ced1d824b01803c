//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use matchwork::domain::JobCompletionPolicy;
use matchwork::domain::ports::IdentityVerifier;
use matchwork::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) identity: Arc<dyn IdentityVerifier>,
    pub(crate) completion_policy: JobCompletionPolicy,
}

impl ServerConfig {
    /// Construct a configuration with the default completion policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, identity: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            bind_addr,
            db_pool,
            identity,
            completion_policy: JobCompletionPolicy::default(),
        }
    }

    /// Choose when a job closes after one of its matches completes.
    #[must_use]
    pub const fn with_completion_policy(mut self, policy: JobCompletionPolicy) -> Self {
        self.completion_policy = policy;
        self
    }
}
