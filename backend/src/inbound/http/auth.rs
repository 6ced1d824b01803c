//! Bearer-token authentication extractor.
//!
//! Handlers take an [`AuthenticatedSubject`] argument to require a verified
//! caller. Missing or rejected credentials short-circuit with
//! `401 unauthorized` before the handler runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::IdentityError;
use crate::domain::{Error, Subject};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Verified caller extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSubject(pub Subject);

impl AuthenticatedSubject {
    /// Borrow the verified subject.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer credential"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid ASCII"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))
}

fn map_identity_error(err: &IdentityError) -> Error {
    debug!(error = %err, "bearer credential rejected");
    match err {
        IdentityError::Expired => Error::unauthorized("credential expired"),
        IdentityError::Invalid { .. } | IdentityError::UnknownRole { .. } => {
            Error::unauthorized("invalid bearer credential")
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedSubject, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    state
        .identity
        .authenticate(token)
        .map(AuthenticatedSubject)
        .map_err(|err| map_identity_error(&err))
}

impl FromRequest for AuthenticatedSubject {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
