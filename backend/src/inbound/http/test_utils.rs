//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, HeaderName};

use crate::domain::ports::{
    IdentityError, IdentityVerifier, MockCompletionCommand, MockCompletionQuery,
    MockIdentityVerifier, MockInterestCommand, MockInterestQuery, MockMatchQuery,
};
use crate::domain::{Role, Subject};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Verifier accepting tokens of the form `student-7` or `employer-3`.
pub struct RoleTokenVerifier;

impl IdentityVerifier for RoleTokenVerifier {
    fn authenticate(&self, credential: &str) -> Result<Subject, IdentityError> {
        let (role, id) = credential
            .split_once('-')
            .ok_or_else(|| IdentityError::invalid("malformed test token"))?;
        let role: Role = role
            .parse()
            .map_err(|_| IdentityError::unknown_role(role))?;
        let id: i64 = id
            .parse()
            .map_err(|_| IdentityError::invalid("non-numeric id"))?;
        Subject::new(id, role).map_err(|err| IdentityError::invalid(err.to_string()))
    }
}

/// `Authorization` header for a [`RoleTokenVerifier`] token.
pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Mocked driving ports; unconfigured mocks fail the test when called.
#[derive(Default)]
pub struct MockPorts {
    pub interests: MockInterestCommand,
    pub interests_query: MockInterestQuery,
    pub matches: MockMatchQuery,
    pub completion: MockCompletionCommand,
    pub completion_query: MockCompletionQuery,
}

impl MockPorts {
    /// Build handler state authenticating with [`RoleTokenVerifier`].
    pub fn into_state(self) -> HttpState {
        self.into_state_with(Arc::new(RoleTokenVerifier))
    }

    fn into_state_with(self, identity: Arc<dyn IdentityVerifier>) -> HttpState {
        HttpState::new(HttpStatePorts {
            identity,
            interests: Arc::new(self.interests),
            interests_query: Arc::new(self.interests_query),
            matches: Arc::new(self.matches),
            completion: Arc::new(self.completion),
            completion_query: Arc::new(self.completion_query),
        })
    }
}

/// Handler state with a specific identity mock and inert driving ports.
pub fn state_with_identity(identity: MockIdentityVerifier) -> HttpState {
    MockPorts::default().into_state_with(Arc::new(identity))
}
