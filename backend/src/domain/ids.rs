//! Strongly typed identifiers for students, employers, jobs and matches.
//!
//! All identifiers are positive 64-bit integers assigned by the store. The
//! newtypes keep a student id from being passed where a job id is expected
//! and reject non-positive values at the boundary.

use serde::{Deserialize, Serialize};

/// Validation failure raised when constructing an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The raw value was zero or negative.
    #[error("{kind} must be a positive integer, got {value}")]
    NotPositive {
        /// Identifier kind, e.g. `jobId`.
        kind: &'static str,
        /// Rejected value.
        value: i64,
    },
}

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub const fn new(value: i64) -> Result<Self, IdValidationError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(IdValidationError::NotPositive { kind: $kind, value })
                }
            }

            /// Raw integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(
    /// Identifier of a student account.
    StudentId,
    "studentId"
);
positive_id!(
    /// Identifier of an employer account.
    EmployerId,
    "employerId"
);
positive_id!(
    /// Identifier of a posted job.
    JobId,
    "jobId"
);
positive_id!(
    /// Identifier of a match row.
    MatchId,
    "matchId"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(42)]
    #[case(i64::MAX)]
    fn accepts_positive_values(#[case] raw: i64) {
        assert_eq!(JobId::new(raw).map(JobId::get), Ok(raw));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn rejects_non_positive_values(#[case] raw: i64) {
        let err = StudentId::new(raw).expect_err("non-positive id");
        assert_eq!(
            err,
            IdValidationError::NotPositive {
                kind: "studentId",
                value: raw
            }
        );
    }

    #[test]
    fn deserialisation_enforces_positivity() {
        let ok: MatchId = serde_json::from_str("9").expect("positive id");
        assert_eq!(ok.get(), 9);
        assert!(serde_json::from_str::<MatchId>("0").is_err());
        assert_eq!(serde_json::to_string(&ok).expect("serialise"), "9");
    }
}
