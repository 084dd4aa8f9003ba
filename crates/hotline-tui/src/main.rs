mod app;
mod components;
mod screens;
mod styles;

use anyhow::Context;
use directories::ProjectDirs;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use hotline_api::{Endpoints, ServiceClients};
use hotline_client::{AppCore, SessionStore, Timings};

use crate::app::App;

/// The TUI owns the terminal, so tracing writes to a log file in the data
/// directory instead of stdout.
fn init_tracing() -> anyhow::Result<()> {
    let project_dirs = ProjectDirs::from("com", "hotline", "hotline")
        .context("could not determine data directory")?;
    let data_dir = project_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    let log_file = std::fs::File::create(data_dir.join("hotline.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("hotline_tui=debug,hotline_client=debug,hotline_api=debug,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    tracing::info!("Starting Hotline");

    let endpoints = Endpoints::from_env();
    let clients = ServiceClients::new(&endpoints).context("failed to build HTTP clients")?;
    let store = SessionStore::new().context("failed to open session store")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut core = AppCore::new(clients, store, Timings::default(), tx);
    core.start();

    let mut app = App::new(core, rx);
    app.run().await.context("terminal error")?;

    tracing::info!("Hotline shut down");
    Ok(())
}
