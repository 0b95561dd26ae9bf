use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventscope::api::{create_router, AppState};
use eventscope::config::Config;
use eventscope::db::{Database, LibSqlBackend};
use eventscope::keyphrase::KeyphraseApiClient;
use eventscope::search::SearchBackendClient;

#[derive(Parser)]
#[command(name = "eventscope")]
#[command(about = "Event search and keyphrase service")]
struct Args {
    /// Path to the JSON or TOML configuration file
    #[arg(long, env = "EVENTSCOPE_CONFIG", default_value = "conf.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventscope=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %args.config.display(), error = %e, "Cannot start without configuration");
            return Err(e.into());
        }
    };

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db = Arc::new(LibSqlBackend::new(raw_db, &config.database));

    let resolver = Arc::new(SearchBackendClient::new(&config.search)?);
    let extractor = Arc::new(KeyphraseApiClient::new(&config.keyphrase)?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db, resolver, extractor);
    let app = create_router(state);

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    tracing::info!("Eventscope starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(cancel_token.cancelled_owned())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
    cancel_token.cancel();
}
