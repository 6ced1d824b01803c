//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use matchwork::inbound::http::health::HealthState;
use matchwork::outbound::identity::JwtIdentityVerifier;
use matchwork::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use matchwork::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let database_url = settings.database_url()?;
    let bind_addr = settings.bind_addr()?;
    let policy = settings.job_completion_policy()?;
    let identity = Arc::new(JwtIdentityVerifier::new(settings.jwt_secret()?));

    if settings.run_migrations {
        run_migrations(database_url).await?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new().with_probe(Arc::new(pool.clone())));
    let config = ServerConfig::new(bind_addr, pool, identity).with_completion_policy(policy);
    let server = create_server(health_state, config)?;

    info!(%bind_addr, policy = policy.as_str(), "matchwork listening");
    server.await?;
    Ok(())
}
