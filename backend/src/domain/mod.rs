//! Domain primitives, ports and services.
//!
//! Purpose: model interest, matches and the completion workflow without any
//! knowledge of HTTP or SQL. Adapters talk to the domain through the traits
//! in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Identifiers: StudentId, EmployerId, JobId, MatchId.
//! - Entities: StudentInterest, EmployerInterest, Match, JobRef.
//! - Services: InterestLedgerService, MatchRegistryService,
//!   CompletionWorkflowService.

pub mod completion;
mod completion_service;
pub mod error;
pub mod identity;
pub mod ids;
pub mod interest;
mod interest_service;
pub mod job;
mod match_deriver;
mod match_service;
pub mod matching;
pub mod ports;
pub mod trace_id;

pub use self::completion::{
    CompletionActor, CompletionApply, CompletionProgress, CompletionSnapshot,
};
pub use self::completion_service::CompletionWorkflowService;
pub use self::error::{Error, ErrorCode};
pub use self::identity::{Role, Subject, UnknownRoleError};
pub use self::ids::{EmployerId, IdValidationError, JobId, MatchId, StudentId};
pub use self::interest::{
    EmployerInterest, EmployerInterestRequest, InterestOutcome, StudentInterest,
    StudentInterestRequest,
};
pub use self::interest_service::InterestLedgerService;
pub use self::job::{JobCompletionPolicy, JobRef, JobStatus, UnknownPolicyError};
pub use self::match_deriver::MatchDeriver;
pub use self::match_service::MatchRegistryService;
pub use self::matching::{Match, MatchKey, MatchStatus};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use matchwork::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such match"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

impl From<IdValidationError> for Error {
    fn from(value: IdValidationError) -> Self {
        match value {
            IdValidationError::NotPositive { kind, .. } => Self::invalid_request(value.to_string())
                .with_details(serde_json::json!({ "field": kind, "code": "not_positive" })),
        }
    }
}
