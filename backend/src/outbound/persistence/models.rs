//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-validate
//! identifiers, so a corrupt row surfaces as a query error instead of a
//! panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    EmployerId, EmployerInterest, IdValidationError, JobId, JobRef, JobStatus, Match, MatchId,
    MatchStatus, StudentId, StudentInterest,
};

use super::schema::{employer_interests, jobs, matches, student_interests};

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Owner and status columns of the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: i64,
    pub employer_id: i64,
    pub status: String,
}

impl TryFrom<JobRow> for JobRef {
    type Error = IdValidationError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: JobId::new(row.id)?,
            employer_id: EmployerId::new(row.employer_id)?,
            status: JobStatus::from_stored(&row.status),
        })
    }
}

// ---------------------------------------------------------------------------
// Interests
// ---------------------------------------------------------------------------

/// Row of the student_interests table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = student_interests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentInterestRow {
    pub student_id: i64,
    pub job_id: i64,
    pub interested: bool,
    pub recorded_at: DateTime<Utc>,
}

impl From<&StudentInterest> for StudentInterestRow {
    fn from(value: &StudentInterest) -> Self {
        Self {
            student_id: value.student_id.get(),
            job_id: value.job_id.get(),
            interested: value.interested,
            recorded_at: value.recorded_at,
        }
    }
}

impl TryFrom<StudentInterestRow> for StudentInterest {
    type Error = IdValidationError;

    fn try_from(row: StudentInterestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            student_id: StudentId::new(row.student_id)?,
            job_id: JobId::new(row.job_id)?,
            interested: row.interested,
            recorded_at: row.recorded_at,
        })
    }
}

/// Row of the employer_interests table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employer_interests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployerInterestRow {
    pub employer_id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub interested: bool,
    pub recorded_at: DateTime<Utc>,
}

impl From<&EmployerInterest> for EmployerInterestRow {
    fn from(value: &EmployerInterest) -> Self {
        Self {
            employer_id: value.employer_id.get(),
            student_id: value.student_id.get(),
            job_id: value.job_id.get(),
            interested: value.interested,
            recorded_at: value.recorded_at,
        }
    }
}

impl TryFrom<EmployerInterestRow> for EmployerInterest {
    type Error = IdValidationError;

    fn try_from(row: EmployerInterestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employer_id: EmployerId::new(row.employer_id)?,
            student_id: StudentId::new(row.student_id)?,
            job_id: JobId::new(row.job_id)?,
            interested: row.interested,
            recorded_at: row.recorded_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// Row of the matches table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = matches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MatchRow {
    pub id: i64,
    pub student_id: i64,
    pub employer_id: i64,
    pub job_id: i64,
    pub is_match: bool,
    pub student_completed: bool,
    pub employer_completed: bool,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for Match {
    type Error = IdValidationError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MatchId::new(row.id)?,
            student_id: StudentId::new(row.student_id)?,
            employer_id: EmployerId::new(row.employer_id)?,
            job_id: JobId::new(row.job_id)?,
            is_match: row.is_match,
            student_completed: row.student_completed,
            employer_completed: row.employer_completed,
            status: MatchStatus::from_stored(row.status.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for a freshly derived match.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = matches)]
pub(crate) struct NewMatchRow<'a> {
    pub student_id: i64,
    pub employer_id: i64,
    pub job_id: i64,
    pub is_match: bool,
    pub status: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
