use serde::{Deserialize, Serialize};

use super::{DashDotModule, Service};

/// One grid cell of the dashboard, bound to a service or a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tile {
    Service(Service),
    #[serde(rename = "dashdot")]
    DashDot(DashDotModule),
}

impl Tile {
    /// Short human label for lists and logs.
    pub fn label(&self) -> &str {
        match self {
            Self::Service(service) => &service.name,
            Self::DashDot(_) => "dash.",
        }
    }

    /// Grid columns this tile occupies.
    pub fn span(&self) -> u16 {
        match self {
            Self::Service(_) => 1,
            Self::DashDot(_) => 2,
        }
    }
}

/// The whole dashboard: tiles in reading order plus grid width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default = "default_columns")]
    pub columns: u16,

    #[serde(default)]
    pub tiles: Vec<Tile>,
}

fn default_columns() -> u16 {
    4
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            tiles: Vec::new(),
        }
    }
}

impl Dashboard {
    /// Mutable access to a dash. tile, for the editing workflow.
    pub fn dashdot_mut(&mut self, index: usize) -> Option<&mut DashDotModule> {
        match self.tiles.get_mut(index) {
            Some(Tile::DashDot(module)) => Some(module),
            _ => None,
        }
    }
}
