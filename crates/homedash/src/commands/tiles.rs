//! `homedash tiles`: what is on the dashboard and what each tile does.

use serde::Serialize;
use tabled::Tabled;

use homedash_core::{Catalog, Tile, TileAction, derive_view, resolve_action};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::load;

#[derive(Debug, Serialize)]
pub struct TileEntry {
    pub index: usize,
    pub kind: &'static str,
    pub label: String,
    pub target: Option<String>,
    /// What activating the tile does in detail mode.
    pub action: String,
}

#[derive(Tabled)]
struct TileRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Name")]
    label: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Action")]
    action: String,
}

impl From<&TileEntry> for TileRow {
    fn from(e: &TileEntry) -> Self {
        Self {
            index: e.index,
            kind: e.kind,
            label: e.label.clone(),
            target: e.target.clone().unwrap_or_else(|| "-".into()),
            action: e.action.clone(),
        }
    }
}

/// Describe one tile.
pub fn describe(index: usize, tile: &Tile, catalog: &Catalog) -> TileEntry {
    match tile {
        Tile::Service(service) => {
            let action = match resolve_action(service, false) {
                TileAction::Inert => "inert (no URL)".to_owned(),
                TileAction::Navigate { new_tab: true, .. } => "open in new tab".to_owned(),
                TileAction::Navigate { new_tab: false, .. } => "open in place".to_owned(),
            };
            TileEntry {
                index,
                kind: "service",
                label: service.name.clone(),
                target: service.url.as_ref().map(ToString::to_string),
                action,
            }
        }
        Tile::DashDot(module) => {
            let view = derive_view(module, false, catalog);
            let mut graphs: Vec<String> = view.main_graphs.iter().map(|g| g.name.clone()).collect();
            if view.has_compact_strip() {
                graphs.push("compact strip".into());
            }
            TileEntry {
                index,
                kind: "dashdot",
                label: view.title,
                target: module.url.as_ref().map(ToString::to_string),
                action: if graphs.is_empty() {
                    "no graphs".into()
                } else {
                    format!("shows {}", graphs.join(", "))
                },
            }
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let loaded = load(global)?;
    let catalog = loaded.config.catalog();
    let entries: Vec<TileEntry> = loaded
        .config
        .dashboard
        .tiles
        .iter()
        .enumerate()
        .map(|(i, tile)| describe(i, tile, &catalog))
        .collect();

    let out = output::render_list(
        &global.output,
        &entries,
        |e| TileRow::from(e),
        |e| format!("{}\t{}", e.index, e.label),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
