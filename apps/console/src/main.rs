use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use client_core::ReqwestTransport;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod prompt;
mod render;
mod repl;
mod state;

use config::{load_settings, validate_base_url};
use controller::{orchestration::Intent, Controller};
use prompt::{AssumeYes, Confirmer, DialoguerConfirmer};
use state::AppState;

/// Operator console for uploading and deleting marketplace catalog items.
#[derive(Parser, Debug)]
#[command(name = "inventory-console", version)]
struct Args {
    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long)]
    api_base: Option<String>,
    /// Settings file (defaults to ./console.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Page size for item listings
    #[arg(long)]
    item_limit: Option<u32>,
    /// Skip confirmation prompts for uploads and deletes
    #[arg(long)]
    yes: bool,
    /// Check the connection and load the file list on startup
    #[arg(long)]
    connect: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_base) = args.api_base {
        settings.api_base = api_base;
    }
    if let Some(item_limit) = args.item_limit {
        settings.item_limit = item_limit;
    }
    if args.yes {
        settings.confirm_destructive = false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let api_base = validate_base_url(&settings.api_base)?;
    info!(%api_base, item_limit = settings.item_limit, "inventory console starting");

    let confirmer: Box<dyn Confirmer> = if settings.confirm_destructive {
        Box::new(DialoguerConfirmer)
    } else {
        Box::new(AssumeYes)
    };
    let mut controller = Controller::new(
        AppState::new(api_base, settings.item_limit),
        ReqwestTransport::new(),
        confirmer,
    );

    if args.connect {
        controller.dispatch(Intent::CheckConnection).await?;
    }

    let stdout = io::stdout();
    repl::run(
        &mut controller,
        io::BufReader::new(io::stdin()),
        &mut stdout.lock(),
    )
    .await
}
