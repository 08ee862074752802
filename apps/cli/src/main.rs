mod terminal;

use std::{
    io::{stderr, stdout},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::load_settings, HttpClassifyClient, SelectedFile, UiState, UploadController,
};
use terminal::TerminalSurface;

/// Upload an image to the classification service and print its scores.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to classify
    file: Option<PathBuf>,

    /// Base url of the classification service (overrides classifier.toml and env)
    #[arg(long)]
    server_url: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(stderr)
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
    tracing::info!(endpoint = client.endpoint(), "classifier client ready");

    let selected = match &args.file {
        Some(path) => Some(
            SelectedFile::load(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?,
        ),
        None => None,
    };
    let subject = selected
        .as_ref()
        .map(|file| file.file_name.clone())
        .unwrap_or_default();

    let mut controller = UploadController::new(TerminalSurface::new(stdout(), stderr(), subject));
    let state = controller.submit(&client, selected).await;

    Ok(match state {
        UiState::Results(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
