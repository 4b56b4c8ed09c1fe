use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use st_api::hydra::Links;
use st_api::{AppState, Cli, Config, router};
use st_store::{StatusService, StatusStore, UserDirectory};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let directory = UserDirectory::new(
        config.shadow_file.clone(),
        config.passwd_file.clone(),
        config.login_defs_file.clone(),
        config.operator.clone(),
    );
    let store = StatusStore::new(config.work_dir.clone());
    let state = AppState::new(
        StatusService::new(directory, store),
        Links::new(config.base_url()),
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "serving screen-time API");
    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
