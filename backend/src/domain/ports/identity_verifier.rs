//! Driven port for verifying bearer credentials.

use crate::domain::Subject;

use super::define_port_error;

define_port_error! {
    /// Reasons a credential is rejected.
    pub enum IdentityError {
        /// Signature, encoding or claims are invalid.
        Invalid { message: String } => "credential rejected: {message}",
        /// The credential is past its expiry.
        Expired => "credential expired",
        /// The role claim is not one the service knows.
        UnknownRole { role: String } => "credential carries unknown role `{role}`",
    }
}

/// Turns a raw bearer credential into a verified [`Subject`].
///
/// Verification is CPU bound and synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `credential` and return the caller it identifies.
    fn authenticate(&self, credential: &str) -> Result<Subject, IdentityError>;
}
