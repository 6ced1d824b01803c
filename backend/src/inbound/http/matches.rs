//! Match registry HTTP handlers.
//!
//! ```text
//! GET /api/v1/students/me/matches
//! GET /api/v1/employers/me/matches
//! GET /api/v1/matches/{matchId}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Match, MatchId, MatchStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedSubject;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const MATCH_ID: FieldName = FieldName::new("matchId");

/// Completion status as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatusBody {
    /// Neither party has confirmed.
    Pending,
    /// Waiting on the employer.
    AwaitingEmployer,
    /// Waiting on the student.
    AwaitingStudent,
    /// Both confirmed.
    Completed,
}

impl From<MatchStatus> for MatchStatusBody {
    fn from(value: MatchStatus) -> Self {
        match value {
            MatchStatus::Pending => Self::Pending,
            MatchStatus::AwaitingEmployer => Self::AwaitingEmployer,
            MatchStatus::AwaitingStudent => Self::AwaitingStudent,
            MatchStatus::Completed => Self::Completed,
        }
    }
}

/// Mutual match as returned to either party.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    /// Match identifier.
    pub id: i64,
    /// Student side.
    pub student_id: i64,
    /// Employer side.
    pub employer_id: i64,
    /// Job matched on.
    pub job_id: i64,
    /// Student confirmed completion.
    pub student_completed: bool,
    /// Employer confirmed completion.
    pub employer_completed: bool,
    /// Status derived from the flags.
    pub status: MatchStatusBody,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

impl From<Match> for MatchResponse {
    fn from(value: Match) -> Self {
        Self {
            id: value.id.get(),
            student_id: value.student_id.get(),
            employer_id: value.employer_id.get(),
            job_id: value.job_id.get(),
            student_completed: value.student_completed,
            employer_completed: value.employer_completed,
            status: value.status.into(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn list_response(rows: Vec<Match>) -> HttpResponse {
    let body: Vec<MatchResponse> = rows.into_iter().map(MatchResponse::from).collect();
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(body)
}

/// Mutual matches of the authenticated student.
#[utoipa::path(
    get,
    path = "/api/v1/students/me/matches",
    responses(
        (status = 200, description = "Matches", body = [MatchResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a student", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "listStudentMatches"
)]
#[get("/students/me/matches")]
pub async fn list_student_matches(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
) -> ApiResult<HttpResponse> {
    let student_id = caller.subject().student_id()?;
    Ok(list_response(state.matches.list_for_student(student_id).await?))
}

/// Mutual matches of the authenticated employer.
#[utoipa::path(
    get,
    path = "/api/v1/employers/me/matches",
    responses(
        (status = 200, description = "Matches", body = [MatchResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an employer", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "listEmployerMatches"
)]
#[get("/employers/me/matches")]
pub async fn list_employer_matches(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
) -> ApiResult<HttpResponse> {
    let employer_id = caller.subject().employer_id()?;
    Ok(list_response(state.matches.list_for_employer(employer_id).await?))
}

/// Fetch one match the caller is a party to.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{matchId}",
    params(("matchId" = i64, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Match", body = MatchResponse),
        (status = 400, description = "Invalid match id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a party", body = ErrorSchema),
        (status = 404, description = "Match not found", body = ErrorSchema)
    ),
    tags = ["matches"],
    operation_id = "getMatch"
)]
#[get("/matches/{matchId}")]
pub async fn get_match(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MatchResponse>> {
    let match_id: MatchId = parse_id(Some(path.into_inner()), MATCH_ID)?;
    let found = state.matches.get_match(match_id).await?;
    if !found.involves(caller.subject()) {
        return Err(Error::forbidden(format!(
            "caller is not a party to match {match_id}"
        )));
    }
    Ok(web::Json(found.into()))
}
