//! Interest ledger HTTP handlers.
//!
//! ```text
//! PUT /api/v1/students/me/interests
//! GET /api/v1/students/me/interests
//! PUT /api/v1/employers/me/interests
//! GET /api/v1/employers/me/likes
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EmployerInterestRequest, InterestOutcome, StudentInterest, StudentInterestRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedSubject;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const JOB_ID: FieldName = FieldName::new("jobId");
const STUDENT_ID: FieldName = FieldName::new("studentId");
const INTERESTED: FieldName = FieldName::new("interested");

/// Student stance on a job.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentInterestPayload {
    /// Job being rated.
    pub job_id: Option<i64>,
    /// `true` to like, `false` to dislike.
    pub interested: Option<bool>,
}

/// Employer stance on a student for one of their jobs.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployerInterestPayload {
    /// Student being rated.
    pub student_id: Option<i64>,
    /// Job the rating applies to; must belong to the caller.
    pub job_id: Option<i64>,
    /// `true` to like, `false` to dislike.
    pub interested: Option<bool>,
}

/// Result of recording a stance.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterestOutcomeResponse {
    /// `interest_saved` or `match_found`.
    #[schema(example = "match_found")]
    pub outcome: String,
    /// Set when the stance completed a mutual like.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<i64>,
}

impl From<InterestOutcome> for InterestOutcomeResponse {
    fn from(value: InterestOutcome) -> Self {
        match value {
            InterestOutcome::Saved => Self {
                outcome: "interest_saved".to_owned(),
                match_id: None,
            },
            InterestOutcome::MatchFound { match_id } => Self {
                outcome: "match_found".to_owned(),
                match_id: Some(match_id.get()),
            },
        }
    }
}

/// A student's like on a job.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// Student who liked the job.
    pub student_id: i64,
    /// Liked job.
    pub job_id: i64,
    /// RFC 3339 timestamp of the last write.
    pub recorded_at: String,
}

impl From<StudentInterest> for LikeResponse {
    fn from(value: StudentInterest) -> Self {
        Self {
            student_id: value.student_id.get(),
            job_id: value.job_id.get(),
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}

fn likes(rows: Vec<StudentInterest>) -> Vec<LikeResponse> {
    rows.into_iter().map(LikeResponse::from).collect()
}

/// Like or dislike a job as the authenticated student.
#[utoipa::path(
    put,
    path = "/api/v1/students/me/interests",
    request_body = StudentInterestPayload,
    responses(
        (status = 200, description = "Stance recorded", body = InterestOutcomeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a student", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "recordStudentInterest"
)]
#[put("/students/me/interests")]
pub async fn record_student_interest(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    payload: web::Json<StudentInterestPayload>,
) -> ApiResult<web::Json<InterestOutcomeResponse>> {
    let student_id = caller.subject().student_id()?;
    let payload = payload.into_inner();
    let request = StudentInterestRequest {
        student_id,
        job_id: parse_id(payload.job_id, JOB_ID)?,
        interested: require(payload.interested, INTERESTED)?,
    };
    let outcome = state.interests.record_student_interest(request).await?;
    Ok(web::Json(outcome.into()))
}

/// Jobs the authenticated student currently likes.
#[utoipa::path(
    get,
    path = "/api/v1/students/me/interests",
    responses(
        (status = 200, description = "Liked jobs", body = [LikeResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a student", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "listLikedJobs"
)]
#[get("/students/me/interests")]
pub async fn list_liked_jobs(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
) -> ApiResult<HttpResponse> {
    let student_id = caller.subject().student_id()?;
    let rows = state.interests_query.list_liked_jobs(student_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(likes(rows)))
}

/// Like or dislike a student for one of the authenticated employer's jobs.
#[utoipa::path(
    put,
    path = "/api/v1/employers/me/interests",
    request_body = EmployerInterestPayload,
    responses(
        (status = 200, description = "Stance recorded", body = InterestOutcomeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Job belongs to another employer", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "recordEmployerInterest"
)]
#[put("/employers/me/interests")]
pub async fn record_employer_interest(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    payload: web::Json<EmployerInterestPayload>,
) -> ApiResult<web::Json<InterestOutcomeResponse>> {
    let employer_id = caller.subject().employer_id()?;
    let payload = payload.into_inner();
    let request = EmployerInterestRequest {
        employer_id,
        student_id: parse_id(payload.student_id, STUDENT_ID)?,
        job_id: parse_id(payload.job_id, JOB_ID)?,
        interested: require(payload.interested, INTERESTED)?,
    };
    let outcome = state.interests.record_employer_interest(request).await?;
    Ok(web::Json(outcome.into()))
}

/// Students who liked one of the employer's jobs and are not matched yet.
#[utoipa::path(
    get,
    path = "/api/v1/employers/me/likes",
    responses(
        (status = 200, description = "Pending likes", body = [LikeResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an employer", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "listPendingLikes"
)]
#[get("/employers/me/likes")]
pub async fn list_pending_likes(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
) -> ApiResult<HttpResponse> {
    let employer_id = caller.subject().employer_id()?;
    let rows = state.interests_query.list_pending_likes(employer_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(likes(rows)))
}
