//! Jackpot Player - native client binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jackpot_player::infrastructure::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local overrides first, so RUST_LOG from .env applies too.
    ClientConfig::load_env_files(&std::env::current_dir()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jackpot_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(ws_url = %config.ws_url, "Starting Jackpot Player");

    jackpot_player::run(config).await
}
