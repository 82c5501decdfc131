// ── Dashboard mode ──

use std::fmt;

/// Which composition the dashboard shows.
///
/// The two modes map to two distinct view trees in the UI. Switching
/// rebuilds the tree instead of toggling a flag inside one, because the
/// grid layout only initialises tile geometry on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardMode {
    /// Read-only, interactive tiles.
    #[default]
    Detail,
    /// Tiles are inert; configuration is editable.
    Edit,
}

impl DashboardMode {
    pub fn from_edit_flag(enabled: bool) -> Self {
        if enabled { Self::Edit } else { Self::Detail }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, Self::Edit)
    }

    /// Whether tiles accept activation (the `pointer-events` switch).
    ///
    /// In edit mode tiles still render in place so the grid keeps its
    /// geometry; they just stop reacting.
    pub fn interaction_enabled(self) -> bool {
        !self.is_edit()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Edit => "edit",
        }
    }
}

impl From<bool> for DashboardMode {
    fn from(enabled: bool) -> Self {
        Self::from_edit_flag(enabled)
    }
}

impl fmt::Display for DashboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
