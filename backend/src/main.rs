//! Backend entry-point: loads configuration, connects the store and serves
//! the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloglist::inbound::http::health::HealthState;
use bloglist::outbound::persistence::{MongoConfig, MongoStore};
use bloglist::outbound::security::{BuildMode, token_settings_from_env};
use server::{Repositories, ServerArgs, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = ServerArgs::parse();

    let token_settings =
        token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %token_settings.fingerprint(),
        ttl_seconds = ?token_settings.ttl.map(|ttl| ttl.as_secs()),
        "token secret loaded"
    );

    let repositories = match &args.mongodb_uri {
        Some(uri) => {
            let store = MongoStore::connect(&MongoConfig::new(uri, &args.mongodb_database))
                .await
                .map_err(std::io::Error::other)?;
            Repositories::mongo(&store)
        }
        None => {
            warn!("MONGODB_URI not set; using in-memory store (data is lost on exit)");
            Repositories::in_memory()
        }
    };
    if args.enable_testing_routes {
        warn!("testing routes enabled; POST /api/testing/reset wipes all data");
    }

    let config = ServerConfig::new(args.bind, Arc::new(token_settings.token_service()))
        .with_repositories(repositories)
        .with_update_policy(args.update_policy)
        .with_testing_routes(args.enable_testing_routes);
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, update_policy = ?args.update_policy, "server listening");
    server.await
}
