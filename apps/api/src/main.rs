mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod pulse;
mod routes;
mod state;
mod talent;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::pulse::news::NewsFeed;
use crate::routes::build_router;
use crate::state::AppState;
use crate::talent::matching::{KeywordTalentMatcher, LlmTalentMatcher, TalentMatcher};
use crate::talent::tables::MatchingTables;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OutcomeOS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.google_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let news = NewsFeed::new()?;

    // Matching tables: built-in unless MATCHING_TABLES_PATH points at a JSON override
    let tables = match &config.matching_tables_path {
        Some(path) => {
            info!("Loading matching tables from {path}");
            MatchingTables::from_json_file(path)?
        }
        None => MatchingTables::default(),
    };
    let keyword = KeywordTalentMatcher::new(Arc::new(tables));

    // KeywordTalentMatcher by default; ENABLE_LLM_MATCHING swaps in the LLM matcher,
    // which falls back to keywords on any failure
    let talent_matcher: Arc<dyn TalentMatcher> = if config.enable_llm_matching {
        Arc::new(LlmTalentMatcher::new(llm.clone(), keyword))
    } else {
        Arc::new(keyword)
    };
    info!("Talent matcher: {}", talent_matcher.backend());

    // Build app state
    let state = AppState {
        db,
        redis,
        s3,
        llm,
        news,
        config: config.clone(),
        talent_matcher,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "outcomeos-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
