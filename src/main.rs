//! PDF Toolbox Server - Entry point

use clap::Parser;
use pdf_toolbox_server::remote::DEFAULT_API_URL;
use pdf_toolbox_server::{run_server_with_config, ILovePdfCredentials, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// HTTP backend for the PDF toolbox
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// iLovePDF project public key
    #[arg(long, env = "ILOVEPDF_PUBLIC_KEY", hide_env_values = true)]
    ilovepdf_public_key: Option<String>,

    /// iLovePDF project secret key
    #[arg(long, env = "ILOVEPDF_SECRET_KEY", hide_env_values = true)]
    ilovepdf_secret_key: Option<String>,

    /// iLovePDF API entry point
    #[arg(long, env = "ILOVEPDF_API_URL", default_value = DEFAULT_API_URL)]
    ilovepdf_api_url: String,

    /// Directory for per-request scratch files (default: OS temp dir)
    #[arg(long, env = "SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// Allowed CORS origin (repeatable; none allows any origin)
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Maximum upload size in megabytes
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 100)]
    max_upload_mb: usize,

    /// Maximum remote result size in megabytes
    #[arg(long, env = "MAX_DOWNLOAD_MB", default_value_t = 200)]
    max_download_mb: u64,

    /// Timeout for each remote call in seconds
    #[arg(long, env = "REMOTE_TIMEOUT_SECS", default_value_t = 300)]
    remote_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            host: self.host,
            port: self.port,
            credentials: ILovePdfCredentials::from_parts(
                self.ilovepdf_public_key,
                self.ilovepdf_secret_key,
            ),
            api_base_url: self.ilovepdf_api_url,
            scratch_dir: self.scratch_dir.unwrap_or(defaults.scratch_dir),
            cors_origins: self.cors_origins,
            max_upload_bytes: self.max_upload_mb * 1024 * 1024,
            max_download_bytes: self.max_download_mb * 1024 * 1024,
            remote_timeout_secs: self.remote_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_toolbox_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Args::parse().into_config();

    tracing::info!(
        host = %config.host,
        port = config.port,
        api = %config.api_base_url,
        scratch_dir = %config.scratch_dir.display(),
        "Starting PDF toolbox server"
    );

    run_server_with_config(config).await
}
