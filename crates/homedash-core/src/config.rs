// ── Runtime configuration ──
//
// These types describe *how* to reach the proxy and how aggressively to
// refresh. They never touch disk: the TUI/CLI builds a `RuntimeConfig`
// (usually via homedash-config) and hands it in.

use std::time::Duration;

use homedash_api::{TlsMode, TransportConfig};
use url::Url;

use crate::query::CachePolicy;

/// TLS verification strategy for the hop to the proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed reverse proxy).
    DangerAcceptInvalid,
}

/// Everything needed to fetch and refresh tile data.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Root of the dashboard backend that exposes `/api/modules/*`.
    pub proxy_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Staleness and eviction policy of the query cache.
    pub cache: CachePolicy,
    /// How often mounted tiles re-request their status.
    pub refresh_interval: Duration,
}

impl RuntimeConfig {
    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

/// Proxy root for a dashboard backend running on the same host.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:7575";

impl Default for RuntimeConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL
                .parse()
                .expect("default proxy URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
            cache: CachePolicy::default(),
            refresh_interval: Duration::from_secs(30),
        }
    }
}
