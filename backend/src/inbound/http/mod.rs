//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::{Scope, web};

pub mod auth;
pub mod completion;
pub mod error;
pub mod health;
pub mod interests;
pub mod matches;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Versioned API scope with every handler and extractor configuration.
///
/// Callers register [`state::HttpState`] as app data alongside it.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use matchwork::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(interests::record_student_interest)
        .service(interests::list_liked_jobs)
        .service(interests::record_employer_interest)
        .service(interests::list_pending_likes)
        .service(matches::list_student_matches)
        .service(matches::list_employer_matches)
        .service(matches::get_match)
        .service(completion::mark_student_complete)
        .service(completion::mark_employer_complete)
        .service(completion::get_completion_progress)
}
