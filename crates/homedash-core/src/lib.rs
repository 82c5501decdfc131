//! Tile data layer between `homedash-api` and UI consumers (CLI / TUI).
//!
//! This crate owns the domain model and the fetch-and-derive pipeline
//! behind every dashboard tile:
//!
//! - **Domain model** ([`model`]): [`Dashboard`], [`Tile`], [`Service`] and
//!   [`DashDotModule`] as authored by the operator. Read-only for tiles; only
//!   the editing workflow mutates them.
//!
//! - **Edit mode** ([`edit_mode_store`]): the session-wide edit flag. A
//!   single [`EditModeWriter`] (not `Clone`) and any number of
//!   [`EditModeReader`]s backed by a `tokio::sync::watch` channel.
//!
//! - **[`QueryCache<T>`]**: key-addressed cache with at-most-one in-flight
//!   fetch per key. Fetches run detached so a dropped caller never cancels
//!   or poisons a shared request. States are explicit: [`QueryState`].
//!
//! - **[`StatusQuery`]**: dash. status on top of the cache. Unconfigured
//!   tiles short-circuit to an empty payload without any I/O.
//!
//! - **View derivation** ([`view`]): pure functions turning configuration
//!   plus fetch state into a render-ready [`DashDotView`], and
//!   [`resolve_action`] for service tile navigation.

pub mod config;
pub mod edit_mode;
pub mod error;
pub mod i18n;
pub mod mode;
pub mod model;
pub mod navigation;
pub mod query;
pub mod settings;
pub mod status;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_PROXY_URL, RuntimeConfig, TlsVerification};
pub use edit_mode::{EditModeReader, EditModeWriter, edit_mode_store};
pub use error::CoreError;
pub use i18n::{Catalog, Translator};
pub use mode::DashboardMode;
pub use navigation::{TileAction, resolve_action};
pub use query::{CachePolicy, QueryCache, QueryKey, QueryState, Snapshot};
pub use settings::DashDotSetting;
pub use status::{STATUS_QUERY, StatusQuery, StatusSource};
pub use view::{
    DashDotView, GraphDescriptor, GraphRow, GraphTheme, NetworkSummary, StorageSummary, TileBody,
    derive_view, graph_url,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DashDotModule, Dashboard, GraphId, Service, ServiceAppearance, ServiceBehaviour, Tile,
};

// Wire types consumers need without depending on the api crate directly.
pub use homedash_api::{DashDotInfo, NetworkInfo, StorageInfo, StorageVolume};
