//! Tin Tuc Server
//!
//! JSON API for the news site: categories, articles with view counting,
//! and a passthrough to a hosted summarization model.
//!
//! Articles live in SQLite; the schema is created on start.

mod config;
mod error;
mod extractors;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tintuc_core::ports::Summarizer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use services::{ArticleService, HuggingFaceSummarizer};
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<ArticleService>,
    pub summarizer: Arc<dyn Summarizer>,
}

#[derive(Parser, Debug)]
#[command(name = "tintuc-server", version, about = "Tin Tuc news API server")]
struct Args {
    /// Insert demo categories and articles if the database is empty
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Tin Tuc Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(args).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: Args) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_url
    );

    let db = Arc::new(
        Database::connect(&config.database_url, config.database_max_connections)
            .await
            .context("Failed to initialize database")?,
    );

    if args.seed || config.seed_data {
        storage::seed::seed_if_empty(db.as_ref())
            .await
            .context("Failed to seed database")?;
    }

    let summarizer = HuggingFaceSummarizer::new(
        config.summarizer_url.clone(),
        config.summarizer_token.clone(),
        Duration::from_secs(config.summarizer_timeout_secs),
    )
    .context("Failed to initialize summarizer")?;
    info!("Summarizer ready: {:?}", summarizer);

    let state = AppState {
        articles: Arc::new(ArticleService::new(db.clone(), db)),
        summarizer: Arc::new(summarizer),
    };

    let app = app(state, cors_layer(&config.cors_allowed_origins));

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/tintuc/hot", get(handlers::articles::hot))
        .route("/tintuc/moinhat", get(handlers::articles::latest))
        .route("/tintuc/:id", get(handlers::articles::detail))
        .route("/tintuc/", post(handlers::articles::create))
        .route("/tintuc", post(handlers::articles::create))
        .route("/danhmuc", get(handlers::categories::list))
        .route("/danhmuc/:id/tintuc", get(handlers::categories::articles))
        .route("/summarize/", post(handlers::summarize::summarize))
        .route("/summarize", post(handlers::summarize::summarize))
}

/// Mirror any origin unless an allow-list is configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    info!("CORS restricted to {} origin(s)", origins.len());

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
