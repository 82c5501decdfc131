//! Render-ready view of a dash. tile.
//!
//! [`derive_view`] is pure: same module, same status presence, same
//! translator ⇒ same view. The TUI calls it on every frame.

mod compact;
mod graph_url;

pub use compact::{NetworkSummary, StorageSummary};
pub use graph_url::{GraphTheme, graph_url};

use crate::i18n::Translator;
use crate::model::{DashDotModule, GraphId};

/// One configured graph, annotated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDescriptor {
    pub id: GraphId,
    pub name: String,
    /// Takes a full row instead of half of one.
    pub two_span: bool,
    pub is_multi_view: bool,
}

impl GraphDescriptor {
    pub fn new(id: GraphId, module: &DashDotModule, translator: &impl Translator) -> Self {
        Self {
            id,
            name: translator.translate(&format!("card.graphs.{}.title", id.translation_id())),
            two_span: id.is_two_span(),
            is_multi_view: module.is_multi_view(id),
        }
    }
}

/// What the tile body shows under its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileBody {
    /// No dash. URL configured.
    NoService,
    /// Configured, but no status payload (yet).
    NoInformation,
    Graphs,
}

impl TileBody {
    /// Translation key of the placeholder message, if the body is one.
    pub fn message_key(self) -> Option<&'static str> {
        match self {
            Self::NoService => Some("card.errors.noService"),
            Self::NoInformation => Some("card.errors.noInformation"),
            Self::Graphs => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashDotView {
    pub title: String,
    /// Every configured graph, in configured order.
    pub graphs: Vec<GraphDescriptor>,
    /// Graphs for the main area. Storage and network move to the compact
    /// strip when compact view is on.
    pub main_graphs: Vec<GraphDescriptor>,
    pub compact_storage_visible: bool,
    pub compact_network_visible: bool,
    pub body: TileBody,
}

/// A row of the main graph area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphRow<'a> {
    Pair(&'a GraphDescriptor, &'a GraphDescriptor),
    Full(&'a GraphDescriptor),
}

impl DashDotView {
    /// Lay out `main_graphs` two per row. Two-span graphs get their own
    /// row, as does a trailing graph left without a partner.
    pub fn graph_rows(&self) -> Vec<GraphRow<'_>> {
        let mut rows = Vec::new();
        let mut pending: Option<&GraphDescriptor> = None;
        for graph in &self.main_graphs {
            if graph.two_span {
                if let Some(half) = pending.take() {
                    rows.push(GraphRow::Full(half));
                }
                rows.push(GraphRow::Full(graph));
            } else if let Some(left) = pending.take() {
                rows.push(GraphRow::Pair(left, graph));
            } else {
                pending = Some(graph);
            }
        }
        if let Some(last) = pending {
            rows.push(GraphRow::Full(last));
        }
        rows
    }

    pub fn has_compact_strip(&self) -> bool {
        self.compact_storage_visible || self.compact_network_visible
    }
}

/// Derive the tile view from its configuration and whether a status
/// payload is available.
pub fn derive_view(
    module: &DashDotModule,
    status_present: bool,
    translator: &impl Translator,
) -> DashDotView {
    let graphs: Vec<GraphDescriptor> = module
        .graphs
        .iter()
        .map(|id| GraphDescriptor::new(*id, module, translator))
        .collect();

    let compact = module.is_compact_view;
    let main_graphs = graphs
        .iter()
        .filter(|g| !compact || !g.id.is_compactable())
        .cloned()
        .collect();

    let body = if module.url.is_none() {
        TileBody::NoService
    } else if status_present {
        TileBody::Graphs
    } else {
        TileBody::NoInformation
    };

    DashDotView {
        title: translator.translate("card.title"),
        compact_storage_visible: compact && module.has_graph(GraphId::Storage),
        compact_network_visible: compact && module.has_graph(GraphId::Network),
        graphs,
        main_graphs,
        body,
    }
}
