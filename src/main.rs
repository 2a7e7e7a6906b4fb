use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use v2ex_tui::app::AppContext;
use v2ex_tui::cli::Cli;
use v2ex_tui::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    // The TUI owns the terminal, so logs go to a file or nowhere.
    let log_file = default_log_path().and_then(|path| open_log_file(&path));
    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });
    tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    for binding in config.keybindings.invalid_bindings() {
        warn!("Ignoring invalid key binding: {}", binding);
    }

    let ctx = AppContext::new(&config.network)?;
    info!("Starting v2ex-tui against {}", config.network.base_url);

    v2ex_tui::tui::run(Arc::new(ctx), Arc::new(config)).await?;
    Ok(())
}

/// `~/.local/share/v2ex-tui/v2ex-tui.log` on Linux.
fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("v2ex-tui").join("v2ex-tui.log"))
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::options().create(true).append(true).open(path).ok()
}
