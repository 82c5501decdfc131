//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use homedash_config::ConfigError;
use homedash_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(homedash::connection_failed),
        help(
            "Check that the dashboard proxy and the dash. instance are running.\n\
             {reason}\n\
             Self-signed proxy? Try: homedash status --insecure"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out{}", homedash_api::error::after(*.seconds))]
    #[diagnostic(
        code(homedash::timeout),
        help("Increase the timeout with --timeout or proxy.timeout in the config file.")
    )]
    Timeout { seconds: Option<u64> },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("dash. request failed: {message}")]
    #[diagnostic(
        code(homedash::upstream),
        help("The proxy answered, but the dash. instance did not return usable data.")
    )]
    Upstream { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(homedash::not_found),
        help("Run: homedash {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{path} already exists")]
    #[diagnostic(
        code(homedash::conflict),
        help("Use --force to overwrite it.")
    )]
    Conflict { path: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(homedash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(homedash::config),
        help("Inspect the file with: homedash config show")
    )]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(homedash::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::Config(ConfigError::Validation { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<&CoreError> for CliError {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: *timeout_secs,
            },
            CoreError::Api { .. } | CoreError::InvalidResponse { .. } => Self::Upstream {
                message: err.to_string(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message.clone(),
            },
            CoreError::Internal(message) => Self::Upstream {
                message: message.clone(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from(&err)
    }
}

impl From<homedash_api::Error> for CliError {
    fn from(err: homedash_api::Error) -> Self {
        Self::from(CoreError::from(err))
    }
}
