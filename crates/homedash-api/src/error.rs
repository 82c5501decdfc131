use thiserror::Error;

/// Top-level error type for the `homedash-api` crate.
///
/// Covers every failure mode of a proxied module request: the hop to the
/// proxy itself, the proxy's answer, and decoding the forwarded payload.
/// `homedash-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out. `timeout_secs` is unknown for clients built
    /// from a caller-supplied `reqwest::Client`.
    #[error("Request timed out{}", after(*.timeout_secs))]
    Timeout { timeout_secs: Option<u64> },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Proxy ───────────────────────────────────────────────────────
    /// The proxy (or the target behind it) answered with a non-2xx status.
    #[error("Proxy returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// `" after Ns"`, or nothing when the limit is unknown.
pub fn after(timeout_secs: Option<u64>) -> String {
    timeout_secs.map_or_else(String::new, |secs| format!(" after {secs}s"))
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Status { status: 404, .. } => true,
            _ => false,
        }
    }
}
