// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation controller daemon (recond)
//!
//! Reads watch events as JSON lines and echoes every reconciled key to
//! stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use recon_adapters::JsonLinesFeed;
use recon_core::shutdown::{self, ShutdownSender};
use recon_core::Resource;
use recon_daemon::{lock_state_dir, serve, setup_logging, Config};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recond", version, about = "Resource reconciliation controller")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch events, one JSON object per line; `-` reads stdin
    #[arg(long, default_value = "-")]
    events: String,

    /// Drain the queue and exit once the events input ends
    #[arg(long)]
    exit_on_eof: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(args));
    // A pending stdin read must not hold up exit
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> Result<()> {

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(path) = args.log_file {
        config.log_path = Some(path);
    }
    if args.exit_on_eof {
        config.controller.stop_on_feed_end = true;
    }

    let _log_guard = setup_logging(config.log_path.as_deref()).context("failed to set up logging")?;
    info!("Starting recond (pid: {})", std::process::id());

    let _lock = match &config.state_dir {
        Some(dir) => Some(lock_state_dir(dir)?),
        None => None,
    };

    let (stop_tx, stop) = shutdown::channel();
    watch_signals(stop_tx)?;

    let out = std::io::stdout();
    let result = if args.events == "-" {
        serve(&config, JsonLinesFeed::<Resource, _>::stdin(), out, stop).await
    } else {
        let feed = JsonLinesFeed::<Resource, _>::open(Path::new(&args.events)).await?;
        serve(&config, feed, out, stop).await
    };

    match result {
        Ok(()) => {
            info!("recond stopped");
            Ok(())
        }
        Err(e) => {
            error!("recond failed: {}", e);
            Err(e.into())
        }
    }
}

/// Turn SIGTERM/SIGINT into a shutdown request
fn watch_signals(stop: ShutdownSender) -> std::io::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
        stop.send_replace(true);
    });
    Ok(())
}
