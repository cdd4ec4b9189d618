use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asset_registry::{config, server};

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
