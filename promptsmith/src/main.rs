use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptsmith::api::{create_router, AppState};
use promptsmith::config::Config;
use promptsmith::providers::ProviderClient;
use promptsmith::store::{HistoryStore, SettingsStore};

#[derive(Parser)]
#[command(name = "promptsmith")]
#[command(about = "Prompt workbench: run prompts against hosted LLM providers")]
struct Args {
    /// Directory for the settings and history files (overrides PROMPTSMITH_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptsmith=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }

    let settings = Arc::new(SettingsStore::open(
        &config.storage.data_dir,
        config.free_plan.max_free_prompts,
    ));
    let history = Arc::new(HistoryStore::open(&config.storage.data_dir));
    let providers = ProviderClient::new(&config.providers)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config, providers, settings, history));

    tracing::info!("Promptsmith starting on http://{}", addr);
    tracing::info!("  Dashboard:    http://{}/", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);
    tracing::info!("  API docs:     http://{}/api/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
