//! Builders wiring Diesel adapters into the domain services.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use matchwork::domain::{CompletionWorkflowService, InterestLedgerService, MatchRegistryService};
use matchwork::inbound::http::state::{HttpState, HttpStatePorts};
use matchwork::outbound::persistence::{
    DieselCompletionRepository, DieselInterestRepository, DieselJobDirectory,
    DieselMatchRepository,
};

use super::ServerConfig;

/// Build handler state backed by PostgreSQL.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = &config.db_pool;
    let interests = Arc::new(DieselInterestRepository::new(pool.clone()));
    let matches = Arc::new(DieselMatchRepository::new(pool.clone()));
    let jobs = Arc::new(DieselJobDirectory::new(pool.clone()));
    let completion_repo = Arc::new(DieselCompletionRepository::new(pool.clone()));

    let ledger = Arc::new(InterestLedgerService::new(
        interests,
        Arc::clone(&matches),
        jobs,
        Arc::new(DefaultClock),
    ));
    let registry = Arc::new(MatchRegistryService::new(matches));
    let completion = Arc::new(CompletionWorkflowService::new(
        completion_repo,
        config.completion_policy,
    ));

    web::Data::new(HttpState::new(HttpStatePorts {
        identity: Arc::clone(&config.identity),
        interests: ledger.clone(),
        interests_query: ledger,
        matches: registry,
        completion: completion.clone(),
        completion_query: completion,
    }))
}
