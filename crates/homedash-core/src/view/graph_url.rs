use serde::{Deserialize, Serialize};
use url::Url;

use super::GraphDescriptor;

/// Colour scheme requested from dash.'s single-graph embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphTheme {
    Light,
    #[default]
    Dark,
}

impl GraphTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Embed URL of a single dash. graph on the instance at `base`.
pub fn graph_url(base: &Url, graph: &GraphDescriptor, theme: GraphTheme) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("singleGraphMode", "true")
        .append_pair("graph", graph.id.as_ref())
        .append_pair("theme", theme.as_str())
        .append_pair("multiView", if graph.is_multi_view { "true" } else { "false" });
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::GraphId;

    #[test]
    fn builds_single_graph_query() {
        let base: Url = "http://dash.lan:3001".parse().unwrap();
        let graph = GraphDescriptor {
            id: GraphId::Cpu,
            name: "CPU".into(),
            two_span: false,
            is_multi_view: true,
        };
        assert_eq!(
            graph_url(&base, &graph, GraphTheme::Dark).as_str(),
            "http://dash.lan:3001/?singleGraphMode=true&graph=cpu&theme=dark&multiView=true"
        );
    }

    #[test]
    fn ram_keeps_its_wire_id() {
        let base: Url = "https://dash.example.com/sub?stale=1".parse().unwrap();
        let graph = GraphDescriptor {
            id: GraphId::Ram,
            name: "RAM".into(),
            two_span: false,
            is_multi_view: false,
        };
        let url = graph_url(&base, &graph, GraphTheme::Light);
        assert_eq!(
            url.as_str(),
            "https://dash.example.com/sub?singleGraphMode=true&graph=ram&theme=light&multiView=false"
        );
    }
}
