//! Shared configuration for the homedash CLI and TUI.
//!
//! One TOML file holds the proxy connection, refresh policy, translation
//! overrides and the dashboard itself. [`Config::runtime_config`] turns it
//! into `homedash_core::RuntimeConfig`. Both binaries depend on this crate.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use homedash_core::{
    CachePolicy, Catalog, DEFAULT_PROXY_URL, DashDotModule, Dashboard, GraphTheme, RuntimeConfig,
    Service, Tile, TlsVerification,
};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "HOMEDASH_CONFIG";

/// Prefix of environment overrides. Nested keys are separated by `__`,
/// e.g. `HOMEDASH_PROXY__URL`.
pub const ENV_PREFIX: &str = "HOMEDASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub proxy: ProxySettings,

    #[serde(default)]
    pub refresh: RefreshSettings,

    #[serde(default)]
    pub appearance: AppearanceSettings,

    /// Overrides for translation keys (`card.title = "Server"`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,

    #[serde(default)]
    pub dashboard: Dashboard,
}

/// How to reach the dashboard backend that proxies module requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxySettings {
    #[serde(default = "default_proxy_url")]
    pub url: String,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            url: default_proxy_url(),
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefreshSettings {
    /// How often the TUI re-requests tile status.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Cached status older than this is refetched.
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u64,

    /// Unused cache entries are dropped after this long.
    #[serde(default = "default_gc_after")]
    pub gc_after_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            stale_after_secs: default_stale_after(),
            gc_after_secs: default_gc_after(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AppearanceSettings {
    /// Theme requested from dash.'s graph embeds (`light` or `dark`).
    #[serde(default)]
    pub graph_theme: GraphTheme,
}

fn default_proxy_url() -> String {
    DEFAULT_PROXY_URL.into()
}
fn default_timeout() -> u64 {
    10
}
fn default_interval() -> u64 {
    30
}
fn default_stale_after() -> u64 {
    30
}
fn default_gc_after() -> u64 {
    300
}

impl Config {
    /// Starter configuration written by `homedash config init`.
    pub fn sample() -> Self {
        let mut service = Service::new("dash.", None);
        service.url = "http://localhost:3001".parse().ok();
        Self {
            dashboard: Dashboard {
                tiles: vec![
                    Tile::Service(service),
                    Tile::DashDot(DashDotModule {
                        url: "http://localhost:3001".parse().ok(),
                        ..DashDotModule::default()
                    }),
                ],
                ..Dashboard::default()
            },
            ..Self::default()
        }
    }

    /// Build the core runtime configuration, validating the proxy URL.
    pub fn runtime_config(&self) -> Result<RuntimeConfig, ConfigError> {
        let proxy_url: url::Url =
            self.proxy
                .url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::Validation {
                    field: "proxy.url".into(),
                    reason: format!("{e}: {}", self.proxy.url),
                })?;

        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "refresh.interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }

        let tls = if self.proxy.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.proxy.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(RuntimeConfig {
            proxy_url,
            tls,
            timeout: Duration::from_secs(self.proxy.timeout),
            cache: CachePolicy {
                stale_after: Duration::from_secs(self.refresh.stale_after_secs),
                gc_after: Duration::from_secs(self.refresh.gc_after_secs),
            },
            refresh_interval: Duration::from_secs(self.refresh.interval_secs),
        })
    }

    /// English strings with this config's overrides applied.
    pub fn catalog(&self) -> Catalog {
        Catalog::english().with_overrides(self.translations.clone())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `HOMEDASH_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("dev", "homedash", "homedash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("homedash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from `path` + environment. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load from `path` alone, without environment overrides. A missing file
/// yields defaults.
pub fn load_file_config(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Replace only the `[dashboard]` section of the file at `path`. Settings
/// that came from the environment or the command line stay out of the file.
pub fn save_dashboard_to(dashboard: &Dashboard, path: &Path) -> Result<(), ConfigError> {
    let mut cfg = load_file_config(path)?;
    cfg.dashboard = dashboard.clone();
    save_config_to(&cfg, path)
}
