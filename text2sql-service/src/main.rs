//! Natural-language-to-SQL query service.
//!
//! Exposes a single endpoint that turns a prompt into a SQL statement via
//! an external language model and runs it against the caller's database:
//! - table-name resolution from the prompt
//! - schema introspection of the resolved tables
//! - SQL synthesis from prompt plus schema
//! - execution with rows or an affected-row count as the result

mod db;
mod handlers;
mod llm;
mod routes;
mod service;
mod state;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{middleware, routing::get, Json, Router};
use common::config::AppConfig;
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "text2sql-service";
const DEFAULT_PORT: u16 = 8000;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Text2SQL API",
        version = "0.1.0",
        description = "Natural-language-to-SQL query service"
    ),
    paths(handlers::execute_query, handlers::health_check,),
    components(schemas(
        common::models::QueryRequest,
        common::models::ConnectionInfo,
        common::models::QueryOutcome,
        common::errors::ErrorBody,
        handlers::HealthResponse,
    )),
    tags(
        (name = "query", description = "Natural-language query endpoint"),
        (name = "health", description = "Health check endpoint")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present) before anything else
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = AppConfig::load(DEFAULT_PORT);

    // Create application state
    let state = AppState::new(config.clone());

    // Create router
    let app = create_router(state)?;

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "starting service");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn create_router(state: AppState) -> anyhow::Result<Router> {
    // One configured origin; all methods and headers from it, with credentials.
    let origin: HeaderValue = state
        .config
        .allowed_origin
        .parse()
        .with_context(|| format!("invalid CORS origin '{}'", state.config.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}
