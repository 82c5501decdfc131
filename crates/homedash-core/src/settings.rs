use strum::{Display, EnumIter, IntoEnumIterator};

/// Editable settings of a dash. tile, each with a translated label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DashDotSetting {
    CpuMultiView,
    StorageMultiView,
    CompactView,
    Graphs,
    Url,
}

impl DashDotSetting {
    pub fn label_key(self) -> &'static str {
        match self {
            Self::CpuMultiView => "descriptor.settings.cpuMultiView.label",
            Self::StorageMultiView => "descriptor.settings.storageMultiView.label",
            Self::CompactView => "descriptor.settings.useCompactView.label",
            Self::Graphs => "descriptor.settings.graphs.label",
            Self::Url => "descriptor.settings.url.label",
        }
    }

    /// Settings toggled with a single key press in the editor.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            Self::CpuMultiView | Self::StorageMultiView | Self::CompactView
        )
    }

    /// Settings in editor display order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}
