//! Command handlers and the shared config context they run against.

pub mod config_cmd;
pub mod status;
pub mod tiles;

use std::path::PathBuf;

use homedash_config::{Config, load_config_from};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolved config file location plus its contents with CLI overrides applied.
pub struct Loaded {
    pub path: PathBuf,
    pub config: Config,
}

/// Load the config file (or defaults when it doesn't exist) and apply
/// `--proxy`, `--insecure` and `--timeout`.
pub fn load(global: &GlobalOpts) -> Result<Loaded, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(homedash_config::config_path);

    let mut config = if path.exists() {
        load_config_from(&path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Config::default()
    };

    if let Some(proxy) = &global.proxy {
        config.proxy.url.clone_from(proxy);
    }
    if global.insecure {
        config.proxy.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        config.proxy.timeout = timeout;
    }

    Ok(Loaded { path, config })
}
