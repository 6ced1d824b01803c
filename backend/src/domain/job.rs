//! Minimal view of the externally owned job record.

use std::fmt;
use std::str::FromStr;

use super::{EmployerId, JobId};

/// Lifecycle of a job as far as matching is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobStatus {
    /// Accepting interest.
    #[default]
    Open,
    /// Work delivered and confirmed by both parties.
    Completed,
}

impl JobStatus {
    /// Persisted literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
        }
    }

    /// Read a stored literal, tolerating the legacy Spanish values.
    ///
    /// Unknown literals read as [`JobStatus::Open`] since only completion
    /// closes a job.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match raw.trim() {
            "completed" | "completado" => Self::Completed,
            _ => Self::Open,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job as read by the matching core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRef {
    /// Job identifier.
    pub id: JobId,
    /// Owning employer.
    pub employer_id: EmployerId,
    /// Current status.
    pub status: JobStatus,
}

/// When a job flips to [`JobStatus::Completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobCompletionPolicy {
    /// The first match on the job to complete closes the job.
    #[default]
    FirstMatch,
    /// The job closes once every mutual match on it has completed.
    AllMatches,
}

impl JobCompletionPolicy {
    /// Decide whether a freshly completed match closes its job.
    ///
    /// `open_matches_remaining` counts other mutual matches on the same job
    /// that have not completed yet.
    #[must_use]
    pub const fn should_complete_job(self, open_matches_remaining: u64) -> bool {
        match self {
            Self::FirstMatch => true,
            Self::AllMatches => open_matches_remaining == 0,
        }
    }

    /// Configuration literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstMatch => "first_match",
            Self::AllMatches => "all_matches",
        }
    }
}

/// Error returned for an unrecognised policy literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job completion policy `{0}`; expected first_match or all_matches")]
pub struct UnknownPolicyError(pub String);

impl FromStr for JobCompletionPolicy {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_match" => Ok(Self::FirstMatch),
            "all_matches" => Ok(Self::AllMatches),
            _ => Err(UnknownPolicyError(s.to_owned())),
        }
    }
}
