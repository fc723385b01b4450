use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::{env, net::SocketAddr, path::PathBuf, time::Duration};
use tracing::{info, warn, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use config_engine::ConfigStore;
use object_gateway::ObjectStoreGateway;
use webcam_server::{create_app, settings, ServerConfig, WebcamServer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Morepork Station webcam HTTP server
#[derive(Parser, Debug)]
#[command(name = "webcam-server")]
#[command(about = "Serves webcam snapshots and camera configuration over HTTP")]
struct Args {
    /// Server bind address
    #[arg(long, env = "WEBCAM_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, env = "WEBCAM_PORT", default_value = "8080")]
    port: u16,

    /// Object store properties file
    #[arg(long, env = "WEBCAM_R2_CONFIG", default_value = "/opt/app/config/r2-config.properties")]
    r2_config: PathBuf,

    /// Directory holding `{name}.config` records
    #[arg(long, env = "WEBCAM_CONFIG_DIR", default_value = "/opt/app/config/webcam/")]
    config_dir: PathBuf,

    /// Upper bound on the `/status` object store probe, in seconds
    #[arg(long, env = "WEBCAM_PROBE_TIMEOUT_SECS", default_value = "10")]
    probe_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log output format; defaults to json when STATION_ENV=production
    #[arg(long, env = "WEBCAM_LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose, args.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Morepork Station webcam server");

    if !args.r2_config.exists() {
        warn!(
            path = %args.r2_config.display(),
            "Object store properties file not found, relying on R2_* environment variables"
        );
    }
    let gateway_settings = settings::load_gateway_settings(&args.r2_config)
        .context("Failed to read object store settings")?;
    let gateway = ObjectStoreGateway::connect(&gateway_settings)
        .await
        .context("Failed to initialize object store gateway")?;
    info!(bucket = gateway.bucket(), "Object store gateway ready");

    if !args.config_dir.is_dir() {
        warn!(path = %args.config_dir.display(), "Configuration directory does not exist");
    }
    let records = ConfigStore::new(&args.config_dir);

    let config = ServerConfig {
        probe_timeout: Duration::from_secs(args.probe_timeout_secs.max(1)),
        ..ServerConfig::default()
    };
    let app = create_app(WebcamServer::new(config, gateway, records));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(address = %addr, "Webcam server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Webcam server stopped");
    Ok(())
}

fn init_tracing(verbose: bool, format: Option<LogFormat>) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let is_production = env::var("STATION_ENV").map(|v| v == "production").unwrap_or(false);
    let format = format.unwrap_or(if is_production {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "webcam_server={level},object_gateway={level},config_engine={level},tower_http=info"
        )
        .into()
    });

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_level(true),
                )
                .init();
        }
        LogFormat::Json => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .json(),
                )
                .init();
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
