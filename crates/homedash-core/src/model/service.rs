use serde::{Deserialize, Serialize};
use url::Url;

/// A service shortcut tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,

    /// Where activating the tile leads. `None` renders an inert tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    #[serde(default)]
    pub appearance: ServiceAppearance,

    #[serde(default)]
    pub behaviour: ServiceBehaviour,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAppearance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBehaviour {
    #[serde(default = "default_true")]
    pub is_opening_new_tab: bool,
}

impl Default for ServiceBehaviour {
    fn default() -> Self {
        Self {
            is_opening_new_tab: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Service {
    /// Convenience constructor used by tests and the CLI `init` scaffold.
    pub fn new(name: impl Into<String>, url: Option<Url>) -> Self {
        Self {
            name: name.into(),
            url,
            appearance: ServiceAppearance::default(),
            behaviour: ServiceBehaviour::default(),
        }
    }
}
