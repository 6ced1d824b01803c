//! Authenticated caller identity.
//!
//! The identity collaborator turns a bearer credential into a [`Subject`]:
//! an account id plus the role it acts under. Services narrow a subject to a
//! typed [`StudentId`] or [`EmployerId`] before touching the ledger.

use std::fmt;
use std::str::FromStr;

use super::{EmployerId, Error, StudentId};

/// Role an authenticated account acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Student looking for short-term work.
    Student,
    /// Employer posting jobs.
    Employer,
}

impl Role {
    /// Canonical lowercase literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Employer => "employer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role literal is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoleError(pub String);

impl fmt::Display for UnknownRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRoleError {}

impl FromStr for Role {
    type Err = UnknownRoleError;

    /// Accepts the canonical literals and the legacy Spanish ones still
    /// present in long-lived tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "estudiante" => Ok(Self::Student),
            "employer" | "empleador" => Ok(Self::Employer),
            _ => Err(UnknownRoleError(s.to_owned())),
        }
    }
}

/// Verified caller.
///
/// # Examples
/// ```
/// use matchwork::domain::{Role, Subject};
///
/// let subject = Subject::new(7, Role::Student).unwrap();
/// assert_eq!(subject.student_id().unwrap().get(), 7);
/// assert!(subject.employer_id().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    id: i64,
    role: Role,
}

impl Subject {
    /// Build a subject, rejecting non-positive account ids.
    pub fn new(id: i64, role: Role) -> Result<Self, Error> {
        if id <= 0 {
            return Err(Error::unauthorized("credential carries an invalid account id"));
        }
        Ok(Self { id, role })
    }

    /// Raw account id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Role the caller acts under.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Narrow to a student id or fail with `forbidden`.
    pub fn student_id(&self) -> Result<StudentId, Error> {
        match self.role {
            Role::Student => StudentId::new(self.id).map_err(|err| Error::unauthorized(err.to_string())),
            Role::Employer => Err(Error::forbidden("this operation is reserved for students")),
        }
    }

    /// Narrow to an employer id or fail with `forbidden`.
    pub fn employer_id(&self) -> Result<EmployerId, Error> {
        match self.role {
            Role::Employer => EmployerId::new(self.id).map_err(|err| Error::unauthorized(err.to_string())),
            Role::Student => Err(Error::forbidden("this operation is reserved for employers")),
        }
    }
}
