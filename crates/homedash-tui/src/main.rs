//! `homedash-tui`: terminal homelab dashboard.
//!
//! Renders the configured tiles on a grid: service shortcuts that open in
//! the browser, and dash. tiles that show live host information fetched
//! through the dashboard proxy. Press `e` to switch into edit mode, where
//! tiles go inert and the selected dash. tile's settings can be changed
//! and saved back to the config file.
//!
//! Logs go to a file (default `/tmp/homedash-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod theme;
mod tiles;
mod tui;
mod views;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use homedash_api::DashDotClient;
use homedash_config::{Config, load_config_from};
use homedash_core::{QueryCache, StatusQuery};

use crate::app::App;

/// Terminal dashboard for homelab services and dash. system monitoring.
#[derive(Parser, Debug)]
#[command(name = "homedash-tui", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long, env = homedash_config::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the dashboard proxy URL (e.g., http://nas.lan:7575)
    #[arg(short = 'p', long, env = "HOMEDASH_PROXY_URL")]
    proxy: Option<String>,

    /// Log file path (defaults to /tmp/homedash-tui.log)
    #[arg(long, default_value = "/tmp/homedash-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Returns the guard that flushes the writer on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "homedash_tui={log_level},homedash_core={log_level},homedash_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("homedash-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Load the config file, or start from defaults when it doesn't exist yet.
fn load(path: &std::path::Path) -> Result<Config> {
    if path.exists() {
        load_config_from(path).wrap_err_with(|| format!("loading {}", path.display()))
    } else {
        info!(path = %path.display(), "no config file, using defaults");
        Ok(Config::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config_path = cli.config.clone().unwrap_or_else(homedash_config::config_path);
    let mut config = load(&config_path)?;
    if let Some(proxy) = &cli.proxy {
        config.proxy.url.clone_from(proxy);
    }

    let runtime = config.runtime_config()?;
    info!(
        proxy = %runtime.proxy_url,
        config = %config_path.display(),
        tiles = config.dashboard.tiles.len(),
        "starting homedash-tui"
    );

    let client = DashDotClient::new(runtime.proxy_url.clone(), &runtime.transport())?;
    let status = StatusQuery::new(client, QueryCache::new(runtime.cache));

    let mut app = App::new(config, config_path, status, runtime.refresh_interval);
    app.run().await?;

    Ok(())
}
