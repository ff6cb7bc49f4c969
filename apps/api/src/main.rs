mod config;
mod db;
mod errors;
mod generation;
mod identity;
mod llm_client;
mod models;
mod normalizer;
mod router;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::identity::FirebaseIdentityProvider;
use crate::llm_client::LlmClient;
use crate::models::job::static_jobs;
use crate::router::Dispatcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PlacementOS API v{}", env!("CARGO_PKG_VERSION"));

    // Document store: PostgreSQL when configured, process memory otherwise
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgDocumentStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; documents are kept in memory and lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_base_url.clone())?;
    info!(
        "LLM client initialized (models: {}, {})",
        llm_client::FLASH_MODEL,
        llm_client::PRO_MODEL
    );

    // Initialize identity provider
    let identity = FirebaseIdentityProvider::new(
        config.firebase_api_key.clone(),
        config.identity_base_url.clone(),
    )?;
    info!("Identity provider initialized ({})", config.identity_base_url);

    let dispatcher = Dispatcher::new(store.clone(), Arc::new(llm), static_jobs());

    // Build app state
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        store,
        identity: Arc::new(identity),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
