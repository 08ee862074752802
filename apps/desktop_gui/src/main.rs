mod backend_bridge;
mod controller;
mod media;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{config::load_settings, HttpClassifyClient};
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::ClassifierApp;

/// Desktop client for the image nudity classifier.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base url of the classification service (overrides classifier.toml and env)
    #[arg(long)]
    server_url: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load classifier settings")?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(secs) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    let client = HttpClassifyClient::new(&settings)?;
    let endpoint = client.endpoint().to_string();
    tracing::info!(endpoint = %endpoint, "starting desktop classifier");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(client, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Image Nudity Classifier")
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Image Nudity Classifier",
        options,
        Box::new(move |_cc| Ok(Box::new(ClassifierApp::new(cmd_tx, ui_rx, endpoint)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
