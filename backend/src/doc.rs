//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the schema
//! wrappers that keep utoipa out of the domain, and the bearer security
//! scheme. Swagger UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::completion::{CompletionPayload, CompletionProgressResponse};
use crate::inbound::http::interests::{
    EmployerInterestPayload, InterestOutcomeResponse, LikeResponse, StudentInterestPayload,
};
use crate::inbound::http::matches::{MatchResponse, MatchStatusBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "HS256 token carrying `user_id`, `role` and `exp` claims.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Matchwork backend API",
        description = "Mutual-interest matching and two-sided job completion for students and employers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::interests::record_student_interest,
        crate::inbound::http::interests::list_liked_jobs,
        crate::inbound::http::interests::record_employer_interest,
        crate::inbound::http::interests::list_pending_likes,
        crate::inbound::http::matches::list_student_matches,
        crate::inbound::http::matches::list_employer_matches,
        crate::inbound::http::matches::get_match,
        crate::inbound::http::completion::mark_student_complete,
        crate::inbound::http::completion::mark_employer_complete,
        crate::inbound::http::completion::get_completion_progress,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MatchStatusBody,
        StudentInterestPayload,
        EmployerInterestPayload,
        InterestOutcomeResponse,
        LikeResponse,
        MatchResponse,
        CompletionPayload,
        CompletionProgressResponse,
    )),
    tags(
        (name = "interests", description = "Likes and dislikes on jobs and students"),
        (name = "matches", description = "Mutual matches"),
        (name = "completion", description = "Two-sided completion confirmation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
