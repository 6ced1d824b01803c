//! Completion workflow HTTP handlers.
//!
//! ```text
//! POST /api/v1/matches/{matchId}/completion/student
//! POST /api/v1/matches/{matchId}/completion/employer
//! GET  /api/v1/matches/{matchId}/completion?jobId=
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CompletionActor, CompletionProgress, JobId, MatchId, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedSubject;
use crate::inbound::http::matches::MatchStatusBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const MATCH_ID: FieldName = FieldName::new("matchId");
const JOB_ID: FieldName = FieldName::new("jobId");

/// Body of a completion confirmation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPayload {
    /// Job the match refers to.
    pub job_id: Option<i64>,
}

/// Query string of the progress endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CompletionQueryParams {
    /// Job the match refers to.
    pub job_id: Option<i64>,
}

/// Confirmation state of a match.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionProgressResponse {
    /// Student has confirmed.
    pub student_done: bool,
    /// Employer has confirmed.
    pub employer_done: bool,
    /// Status derived from both flags.
    pub status: MatchStatusBody,
}

impl From<CompletionProgress> for CompletionProgressResponse {
    fn from(value: CompletionProgress) -> Self {
        Self {
            student_done: value.student_done,
            employer_done: value.employer_done,
            status: value.status.into(),
        }
    }
}

fn parse_target(match_id: i64, job_id: Option<i64>) -> ApiResult<(MatchId, JobId)> {
    Ok((parse_id(Some(match_id), MATCH_ID)?, parse_id(job_id, JOB_ID)?))
}

/// Confirm completion as the match's student.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{matchId}/completion/student",
    params(("matchId" = i64, Path, description = "Match identifier")),
    request_body = CompletionPayload,
    responses(
        (status = 200, description = "Confirmation recorded", body = CompletionProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not the match's student", body = ErrorSchema),
        (status = 404, description = "Match not found on this job", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["completion"],
    operation_id = "markStudentComplete"
)]
#[post("/matches/{matchId}/completion/student")]
pub async fn mark_student_complete(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<i64>,
    payload: web::Json<CompletionPayload>,
) -> ApiResult<web::Json<CompletionProgressResponse>> {
    let student_id = caller.subject().student_id()?;
    let (match_id, job_id) = parse_target(path.into_inner(), payload.job_id)?;
    let progress = state
        .completion
        .mark_student_complete(match_id, student_id, job_id)
        .await?;
    Ok(web::Json(progress.into()))
}

/// Confirm completion as the owner of the match's job.
#[utoipa::path(
    post,
    path = "/api/v1/matches/{matchId}/completion/employer",
    params(("matchId" = i64, Path, description = "Match identifier")),
    request_body = CompletionPayload,
    responses(
        (status = 200, description = "Confirmation recorded", body = CompletionProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Match not found on this job", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["completion"],
    operation_id = "markEmployerComplete"
)]
#[post("/matches/{matchId}/completion/employer")]
pub async fn mark_employer_complete(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<i64>,
    payload: web::Json<CompletionPayload>,
) -> ApiResult<web::Json<CompletionProgressResponse>> {
    let employer_id = caller.subject().employer_id()?;
    let (match_id, job_id) = parse_target(path.into_inner(), payload.job_id)?;
    let progress = state
        .completion
        .mark_employer_complete(match_id, employer_id, job_id)
        .await?;
    Ok(web::Json(progress.into()))
}

/// Current confirmation state, visible to both parties.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{matchId}/completion",
    params(
        ("matchId" = i64, Path, description = "Match identifier"),
        CompletionQueryParams
    ),
    responses(
        (status = 200, description = "Confirmation state", body = CompletionProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a party", body = ErrorSchema),
        (status = 404, description = "Match not found on this job", body = ErrorSchema)
    ),
    tags = ["completion"],
    operation_id = "getCompletionProgress"
)]
#[get("/matches/{matchId}/completion")]
pub async fn get_completion_progress(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<i64>,
    query: web::Query<CompletionQueryParams>,
) -> ApiResult<web::Json<CompletionProgressResponse>> {
    let (match_id, job_id) = parse_target(path.into_inner(), query.job_id)?;
    let subject = caller.subject();
    let viewer = match subject.role() {
        Role::Student => CompletionActor::Student(subject.student_id()?),
        Role::Employer => CompletionActor::Employer(subject.employer_id()?),
    };
    let progress = state
        .completion_query
        .get_progress(match_id, job_id, viewer)
        .await?;
    Ok(web::Json(progress.into()))
}
