use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use url::Url;

/// A dash. graph that a tile can show.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GraphId {
    Cpu,
    Storage,
    Ram,
    Network,
    Gpu,
}

impl GraphId {
    /// Identifier used in translation keys. dash. calls RAM "memory".
    pub fn translation_id(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Storage => "storage",
            Self::Ram => "memory",
            Self::Network => "network",
            Self::Gpu => "gpu",
        }
    }

    /// Wide graphs take two grid columns.
    pub fn is_two_span(self) -> bool {
        matches!(self, Self::Network | Self::Gpu)
    }

    /// Graphs that move to the compact strip when compact view is on.
    pub fn is_compactable(self) -> bool {
        matches!(self, Self::Storage | Self::Network)
    }

    /// All graphs in canonical order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Configuration of one dash. integration tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashDotModule {
    /// Base URL of the dash. instance. `None` means "not configured yet".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    /// Graphs to show, in display order.
    #[serde(default = "default_graphs")]
    pub graphs: Vec<GraphId>,

    #[serde(default)]
    pub is_cpu_multi_view: bool,

    #[serde(default)]
    pub is_storage_multi_view: bool,

    #[serde(default)]
    pub is_compact_view: bool,
}

fn default_graphs() -> Vec<GraphId> {
    vec![GraphId::Cpu, GraphId::Storage, GraphId::Ram, GraphId::Network]
}

impl Default for DashDotModule {
    fn default() -> Self {
        Self {
            url: None,
            graphs: default_graphs(),
            is_cpu_multi_view: false,
            is_storage_multi_view: false,
            is_compact_view: false,
        }
    }
}

impl DashDotModule {
    /// Whether `graph` is configured on this tile.
    pub fn has_graph(&self, graph: GraphId) -> bool {
        self.graphs.contains(&graph)
    }

    /// Whether `graph` should render its per-series view.
    pub fn is_multi_view(&self, graph: GraphId) -> bool {
        match graph {
            GraphId::Cpu => self.is_cpu_multi_view,
            GraphId::Storage => self.is_storage_multi_view,
            _ => false,
        }
    }

    /// Add `graph` if missing, remove it otherwise. Re-added graphs keep
    /// canonical order relative to the graphs already present.
    pub fn toggle_graph(&mut self, graph: GraphId) {
        if let Some(pos) = self.graphs.iter().position(|g| *g == graph) {
            self.graphs.remove(pos);
            return;
        }
        let rank = |g: GraphId| GraphId::all().position(|x| x == g).unwrap_or(usize::MAX);
        let insert_at = self
            .graphs
            .iter()
            .position(|g| rank(*g) > rank(graph))
            .unwrap_or(self.graphs.len());
        self.graphs.insert(insert_at, graph);
    }
}
