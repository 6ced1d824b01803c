//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies carry raw integers and optional fields; these helpers turn
//! them into domain identifiers and report failures as `invalid_request`
//! errors with `field` and `code` details.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, IdValidationError};

/// Validation failure codes reported in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    NotPositive,
    MalformedBody,
    MalformedQuery,
    MalformedPath,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::NotPositive => "not_positive",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
            Self::MalformedPath => "malformed_path",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Require an optional field to be present.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a required identifier field into a domain id.
pub(crate) fn parse_id<T>(value: Option<i64>, field: FieldName) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    let raw = require(value, field)?;
    T::try_from(raw).map_err(|_| {
        field_error(
            field,
            ValidationCode::NotPositive,
            format!("{} must be a positive integer, got {raw}", field.as_str()),
        )
    })
}

fn malformed(code: ValidationCode, detail: impl std::fmt::Display) -> actix_web::Error {
    Error::invalid_request(format!("malformed request: {detail}"))
        .with_details(json!({ "code": code.as_str() }))
        .into()
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            malformed(ValidationCode::MalformedBody, err)
        })
}

/// Query extractor configuration reporting malformed query strings as
/// `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            malformed(ValidationCode::MalformedQuery, err)
        })
}

/// Path extractor configuration reporting malformed segments as
/// `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        malformed(ValidationCode::MalformedPath, err)
    })
}
