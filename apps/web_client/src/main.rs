use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::VideoApiClient;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use web_client::{backend_bridge, config, controller::Controller, terminal};

const COMMAND_QUEUE_CAPACITY: usize = 16;
const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "web_client", about = "Analyze a video URL, pick a format, download it")]
struct Args {
    /// Base URL of the backend serving /api/analyze and /api/download.
    #[arg(long)]
    server_url: Option<String>,
    /// Config file; defaults to ./web_client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory downloaded files are written to.
    #[arg(long)]
    save_dir: Option<PathBuf>,
    #[arg(long)]
    log_filter: Option<String>,
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_filter.as_deref());

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(save_dir) = args.save_dir {
        settings.save_dir = save_dir;
    }
    settings.validate()?;
    tracing::info!(
        server_url = %settings.server_url,
        save_dir = %settings.save_dir.display(),
        "starting web client"
    );

    let client = VideoApiClient::new(&settings.server_url, settings.request_timeout())
        .context("failed to create backend client")?;

    let (cmd_tx, cmd_rx) = bounded(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded(EVENT_QUEUE_CAPACITY);
    let _worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(client))?;

    let controller = Controller::new(cmd_tx, ui_rx, settings.controller_options());
    terminal::run(controller)
}
