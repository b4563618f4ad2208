//! HTTP server: configuration, shared state and routing
//!
//! Every tool in [`tools::ALL`] is mounted as `POST <route>` on the same
//! pipeline handler; `GET /health` reports liveness.

use crate::error::Result;
use crate::pipeline::handle_tool;
use crate::remote::{ILovePdfClient, ILovePdfCredentials, TaskService, DEFAULT_API_URL};
use crate::tools;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind (default: 127.0.0.1)
    pub host: String,
    /// Port to bind (default: 3000)
    pub port: u16,
    /// iLovePDF project keys; requests fail with a configuration error without them
    pub credentials: Option<ILovePdfCredentials>,
    /// iLovePDF API entry point (default: https://api.ilovepdf.com)
    pub api_base_url: String,
    /// Parent directory of per-request scratch directories (default: OS temp dir)
    pub scratch_dir: PathBuf,
    /// Browser origins allowed by CORS; empty allows any origin
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes (default: 100MB)
    pub max_upload_bytes: usize,
    /// Maximum remote result size in bytes (default: 200MB)
    pub max_download_bytes: u64,
    /// Timeout for each remote HTTP call in seconds (default: 300)
    pub remote_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            credentials: None,
            api_base_url: DEFAULT_API_URL.to_string(),
            scratch_dir: std::env::temp_dir(),
            cors_origins: Vec::new(),
            max_upload_bytes: 100 * 1024 * 1024,   // 100MB
            max_download_bytes: 200 * 1024 * 1024, // 200MB
            remote_timeout_secs: 300,
        }
    }
}

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub tasks: Arc<dyn TaskService>,
}

impl AppState {
    /// State backed by the iLovePDF client
    pub fn new(config: ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)?;
        let client = ILovePdfClient::new(
            base_url,
            Duration::from_secs(config.remote_timeout_secs),
            config.max_download_bytes,
        )?;
        Ok(Self::with_task_service(config, Arc::new(client)))
    }

    /// State backed by an arbitrary task service
    pub fn with_task_service(config: ServerConfig, tasks: Arc<dyn TaskService>) -> Self {
        Self {
            config: Arc::new(config),
            tasks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    let cors = cors_layer(&state.config.cors_origins);

    let mut router = Router::new().route("/health", get(health));
    for &tool in tools::ALL {
        router = router.route(
            tool.route,
            post(
                move |State(state): State<AppState>,
                      multipart: std::result::Result<Multipart, MultipartRejection>| {
                    handle_tool(tool, state, multipart)
                },
            ),
        );
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION]);

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

/// Run the server with default configuration
pub async fn run_server() -> anyhow::Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the server until Ctrl-C
pub async fn run_server_with_config(config: ServerConfig) -> anyhow::Result<()> {
    if config.credentials.is_none() {
        tracing::warn!("iLovePDF keys are not configured; tool requests will fail");
    }

    let address = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config)?;
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        tools = tools::ALL.len(),
        "PDF toolbox server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
