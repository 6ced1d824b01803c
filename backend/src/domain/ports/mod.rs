//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the job directory, the identity verifier)
//! are implemented by outbound adapters. Driving ports (commands and
//! queries) are implemented by domain services and consumed by inbound
//! adapters. Each driven port exposes a typed error so adapters map their
//! failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_command;
mod completion_repository;
mod identity_verifier;
mod interest_command;
mod interest_query;
mod interest_repository;
mod job_directory;
mod match_query;
mod match_repository;

pub use completion_command::{CompletionCommand, CompletionQuery};
#[cfg(test)]
pub use completion_command::{MockCompletionCommand, MockCompletionQuery};
#[cfg(test)]
pub use completion_repository::MockCompletionRepository;
pub use completion_repository::{CompletionRepository, CompletionRepositoryError};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityError, IdentityVerifier};
pub use interest_command::InterestCommand;
#[cfg(test)]
pub use interest_command::MockInterestCommand;
pub use interest_query::InterestQuery;
#[cfg(test)]
pub use interest_query::MockInterestQuery;
#[cfg(test)]
pub use interest_repository::MockInterestRepository;
pub use interest_repository::{InterestRepository, InterestRepositoryError};
#[cfg(test)]
pub use job_directory::MockJobDirectory;
pub use job_directory::{JobDirectory, JobDirectoryError};
pub use match_query::MatchQuery;
#[cfg(test)]
pub use match_query::MockMatchQuery;
#[cfg(test)]
pub use match_repository::MockMatchRepository;
pub use match_repository::{MatchRepository, MatchRepositoryError};
