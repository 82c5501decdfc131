//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::time::Instant;

use homedash_core::{Dashboard, DashDotInfo, DashboardMode, QueryState};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Mode ──
    /// Ask the edit-mode writer to flip the flag.
    ToggleEditMode,
    /// The edit-mode flag changed; rebuild the view for `mode`.
    ModeChanged(DashboardMode),

    // ── Overlays ──
    ToggleHelp,
    Notify(Notification),
    DismissNotification,

    // ── Tiles ──
    /// A status watcher resolved. `watch` identifies the watcher; results
    /// from a watcher whose tile was unmounted or retargeted are dropped.
    /// `resolved_at` is when the cached value was fetched, not delivered.
    StatusResolved {
        watch: u64,
        tile: usize,
        state: QueryState<DashDotInfo>,
        resolved_at: Option<Instant>,
    },
    /// Mark cached status stale and refetch every mounted tile.
    Refresh,
    /// Open a URL with the system handler.
    OpenUrl { url: url::Url, new_tab: bool },

    // ── Editing ──
    /// The edit view changed the working dashboard.
    DashboardEdited(Dashboard),
    /// Persist the dashboard to the config file.
    SaveDashboard(Dashboard),
}
