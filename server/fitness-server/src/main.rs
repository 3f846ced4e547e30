use clap::Parser;
use error_common::{log_error, FitnessError, Result};
use fitness_server::{config::DEFAULT_CONFIG_FILE, create_app, AppConfig, FitnessServer};
use database_layer::StorageBackend;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fitness-server")]
#[command(about = "Fitness Center HTTP API for members and workout sessions")]
struct Args {
    /// Server host
    #[arg(long, env = "FITNESS_HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long, env = "FITNESS_PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Keep data in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_tracing(args.verbose)?;

    if let Err(e) = run(args).await {
        log_error("fitness-server", &e);
        return Err(e);
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut config = AppConfig::load(&args.config)
        .map_err(|e| FitnessError::ConfigError(e.to_string()))?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.in_memory {
        config.database.backend = StorageBackend::Memory;
    }

    info!("Starting Fitness Center server");
    info!(
        config_file = %args.config,
        backend = ?config.database.backend,
        "Configuration loaded"
    );

    let addr = config.bind_address();
    let server = FitnessServer::new(config)
        .await
        .map_err(|e| FitnessError::DatabaseError(e.to_string()))?;

    let app = create_app(server.clone());

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| FitnessError::NetworkError(format!("Failed to bind {addr}: {e}")))?;

    info!("Fitness Center server listening on http://{}", addr);
    info!("API documentation at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FitnessError::ServerError(e.to_string()))?;

    server.shutdown().await;
    Ok(())
}

/// Pretty output for development, JSON lines when `FITNESS_ENV=production`
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let is_production = std::env::var("FITNESS_ENV").is_ok_and(|v| v == "production");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "fitness_server={level},database_layer={level},config_engine={level},tower_http=info,sqlx=warn"
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    let initialized = if is_production {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    initialized.map_err(|e| FitnessError::ServerError(format!("Failed to initialize tracing: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
