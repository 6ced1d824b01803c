//! HS256 bearer token verification.
//!
//! Tokens are issued elsewhere; this adapter only checks the signature and
//! expiry and reads the `user_id` and `role` claims.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityError, IdentityVerifier};
use crate::domain::{Role, Subject};

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Student or employer identifier.
    pub user_id: i64,
    /// `student`/`estudiante` or `employer`/`empleador`.
    pub role: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// Verifies HS256 tokens signed with a shared secret.
pub struct JwtIdentityVerifier {
    secret: Zeroizing<String>,
    validation: Validation,
}

impl JwtIdentityVerifier {
    /// Build a verifier for `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;
        Self {
            secret: Zeroizing::new(secret.into()),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityVerifier")
            .field("secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl IdentityVerifier for JwtIdentityVerifier {
    fn authenticate(&self, credential: &str) -> Result<Subject, IdentityError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let data = decode::<JwtClaims>(credential, &key, &self.validation).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err.kind() {
                ErrorKind::ExpiredSignature => IdentityError::expired(),
                _ => IdentityError::invalid(err.to_string()),
            }
        })?;

        let claims = data.claims;
        let role: Role = claims
            .role
            .parse()
            .map_err(|_| IdentityError::unknown_role(claims.role.as_str()))?;
        Subject::new(claims.user_id, role).map_err(|err| IdentityError::invalid(err.message()))
    }
}
