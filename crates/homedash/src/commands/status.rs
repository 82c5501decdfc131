//! `homedash status`: probe dash. tiles through the dashboard proxy.

use bytesize::ByteSize;
use futures::future::join_all;
use serde::Serialize;
use tabled::Tabled;
use url::Url;

use homedash_api::DashDotClient;
use homedash_core::{
    DashDotInfo, NetworkSummary, QueryCache, QueryState, StatusQuery, StorageSummary, Tile,
};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::load;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeState {
    Ok,
    Unreachable,
    NotConfigured,
}

impl ProbeState {
    fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Unreachable => "unreachable",
            Self::NotConfigured => "not configured",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Ok => Tone::Good,
            Self::Unreachable => Tone::Bad,
            Self::NotConfigured => Tone::Muted,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusEntry {
    pub tile: usize,
    pub target: Option<String>,
    pub state: ProbeState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_bps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_bps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusEntry {
    fn new(tile: usize, target: Option<&Url>, state: &QueryState<DashDotInfo>) -> Self {
        let mut entry = Self {
            tile,
            target: target.map(ToString::to_string),
            state: ProbeState::NotConfigured,
            storage_bytes: None,
            volumes: None,
            up_bps: None,
            down_bps: None,
            error: None,
        };
        if target.is_none() {
            return entry;
        }
        match state {
            QueryState::Ready(info) => {
                let storage = StorageSummary::from_info(info);
                let network = NetworkSummary::from_info(info);
                entry.state = ProbeState::Ok;
                entry.storage_bytes = Some(storage.total_bytes);
                entry.volumes = Some(storage.volumes);
                entry.up_bps = Some(network.up_bps);
                entry.down_bps = Some(network.down_bps);
            }
            QueryState::Failed(err) => {
                entry.state = ProbeState::Unreachable;
                entry.error = Some(err.to_string());
            }
            QueryState::Pending => entry.state = ProbeState::Unreachable,
        }
        entry
    }
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "#")]
    tile: usize,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Storage")]
    storage: String,
    #[tabled(rename = "Network ↑/↓")]
    network: String,
}

fn bits(rate: f64) -> String {
    // dash. reports link speed in bits per second.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    let bytes = (rate / 8.0).max(0.0) as u64;
    format!("{}/s", ByteSize::b(bytes))
}

fn to_row(entry: &StatusEntry, color: bool) -> StatusRow {
    StatusRow {
        tile: entry.tile,
        target: entry.target.clone().unwrap_or_else(|| "-".into()),
        state: output::paint(entry.state.label(), entry.state.tone(), color),
        storage: match (entry.storage_bytes, entry.volumes) {
            (Some(bytes), Some(volumes)) => format!("{} ({volumes} volumes)", ByteSize::b(bytes)),
            _ => "-".into(),
        },
        network: match (entry.up_bps, entry.down_bps) {
            (Some(up), Some(down)) => format!("{} / {}", bits(up), bits(down)),
            _ => "-".into(),
        },
    }
}

pub async fn handle(args: StatusArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let loaded = load(global)?;
    let runtime = loaded.config.runtime_config()?;
    let client = DashDotClient::new(runtime.proxy_url.clone(), &runtime.transport())?;
    let query = StatusQuery::new(client, QueryCache::new(runtime.cache));

    let tiles = &loaded.config.dashboard.tiles;
    let targets: Vec<(usize, Option<&Url>)> = match args.tile {
        Some(index) => match tiles.get(index) {
            Some(Tile::DashDot(module)) => vec![(index, module.url.as_ref())],
            Some(Tile::Service(_)) => {
                return Err(CliError::Validation {
                    field: "tile".into(),
                    reason: format!("tile {index} is a service shortcut, not a dash. tile"),
                });
            }
            None => {
                return Err(CliError::NotFound {
                    resource_type: "tile".into(),
                    identifier: index.to_string(),
                    list_command: "tiles".into(),
                });
            }
        },
        None => tiles
            .iter()
            .enumerate()
            .filter_map(|(i, tile)| match tile {
                Tile::DashDot(module) => Some((i, module.url.as_ref())),
                Tile::Service(_) => None,
            })
            .collect(),
    };

    tracing::debug!(tiles = targets.len(), proxy = %runtime.proxy_url, "probing dash. tiles");
    // Tiles sharing a target resolve through one request.
    let states = join_all(targets.iter().map(|(_, target)| query.fetch_status(*target))).await;

    let entries: Vec<StatusEntry> = targets
        .iter()
        .zip(&states)
        .map(|((tile, target), state)| StatusEntry::new(*tile, *target, state))
        .collect();

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &entries,
        |e| to_row(e, color),
        |e| format!("{}\t{}", e.tile, e.state.label()),
    )?;
    output::print_output(&out, global.quiet);

    match states.iter().find_map(QueryState::error) {
        Some(err) => Err(CliError::from(err)),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use homedash_core::{CoreError, StorageInfo, StorageVolume};

    use super::*;

    #[test]
    fn unconfigured_tile_is_reported_without_metrics() {
        let state = QueryState::Ready(Arc::new(DashDotInfo::default()));
        let entry = StatusEntry::new(2, None, &state);
        assert_eq!(entry.state, ProbeState::NotConfigured);
        assert!(entry.storage_bytes.is_none());
    }

    #[test]
    fn ready_status_sums_volumes() {
        let target: Url = "http://dash.lan:3001".parse().unwrap();
        let info = DashDotInfo {
            storage: StorageInfo {
                layout: vec![StorageVolume { size: 1000 }, StorageVolume { size: 24 }],
            },
            ..DashDotInfo::default()
        };
        let entry = StatusEntry::new(1, Some(&target), &QueryState::Ready(Arc::new(info)));
        assert_eq!(entry.state, ProbeState::Ok);
        assert_eq!(entry.storage_bytes, Some(1024));
        assert_eq!(entry.volumes, Some(2));
    }

    #[test]
    fn failure_keeps_the_error_message() {
        let target: Url = "http://dash.lan:3001".parse().unwrap();
        let state = QueryState::Failed(Arc::new(CoreError::Api {
            message: "HTTP 502".into(),
            status: Some(502),
        }));
        let entry = StatusEntry::new(1, Some(&target), &state);
        assert_eq!(entry.state, ProbeState::Unreachable);
        assert!(entry.error.unwrap().contains("502"));
    }

    #[test]
    fn link_speed_is_shown_in_bytes() {
        assert_eq!(bits(8_000.0), format!("{}/s", ByteSize::b(1000)));
    }
}
