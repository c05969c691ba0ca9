use anyhow::Context;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use screening_estore::{config::Config, shell, AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("invalid configuration")?;

    // stdout принадлежит shell, логи уходят в stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        environment = %config.app.environment,
        backend = %config.api.base_url,
        "Starting screening e-store"
    );

    let app_state = AppState::new(config).context("failed to build the API client")?;

    shell::run(app_state).await?;

    info!("Bye");
    Ok(())
}
