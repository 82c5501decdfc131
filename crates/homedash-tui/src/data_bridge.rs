//! Data bridge: background tasks that feed core state into TUI actions.
//!
//! Status watchers poll a tile's dash. status through the shared query
//! cache; the edit-mode forwarder turns flag changes into
//! [`Action::ModeChanged`]. Every task stops on cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;
use url::Url;

use homedash_api::DashDotClient;
use homedash_core::{Catalog, DashboardMode, EditModeReader, GraphTheme, StatusQuery};

use crate::action::Action;

pub type Status = StatusQuery<DashDotClient>;

/// Shared handles every mounted view and tile needs.
#[derive(Clone)]
pub struct TileContext {
    pub status: Status,
    pub catalog: Arc<Catalog>,
    pub graph_theme: GraphTheme,
    pub edit_mode: EditModeReader,
    pub refresh_interval: Duration,
    pub action_tx: mpsc::UnboundedSender<Action>,
}

static NEXT_WATCH: AtomicU64 = AtomicU64::new(1);

/// Handle to a running status watcher. Dropping it stops the watcher.
pub struct StatusWatch {
    pub id: u64,
    _guard: DropGuard,
}

/// Spawn a watcher that resolves `target`'s status now and then every
/// refresh interval, reporting each result as [`Action::StatusResolved`].
///
/// A fetch still in flight when the watch is dropped completes in the
/// cache, but its result is never delivered.
pub fn spawn_status_watch(ctx: &TileContext, tile: usize, target: Option<Url>) -> StatusWatch {
    let id = NEXT_WATCH.fetch_add(1, Ordering::Relaxed);
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();
    let status = ctx.status.clone();
    let tx = ctx.action_tx.clone();
    let interval = ctx.refresh_interval;

    tokio::spawn(async move {
        loop {
            let state = tokio::select! {
                biased;
                () = task_cancel.cancelled() => break,
                state = status.fetch_status(target.as_ref()) => state,
            };
            if task_cancel.is_cancelled() {
                break;
            }
            let resolved_at = target
                .as_ref()
                .and_then(|url| status.resolved_at(url))
                .map(tokio::time::Instant::into_std);
            if tx
                .send(Action::StatusResolved {
                    watch: id,
                    tile,
                    state,
                    resolved_at,
                })
                .is_err()
            {
                break;
            }
            // Unconfigured tiles have nothing to refresh.
            if target.is_none() {
                break;
            }
            tokio::select! {
                biased;
                () = task_cancel.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
        debug!(watch = id, tile, "status watcher stopped");
    });

    StatusWatch {
        id,
        _guard: cancel.drop_guard(),
    }
}

/// Forward edit-mode changes as [`Action::ModeChanged`] until cancelled
/// or the writer goes away.
pub async fn forward_edit_mode(
    mut reader: EditModeReader,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = reader.changed() => {
                let Some(enabled) = changed else { break };
                debug!(enabled, "forwarding edit mode change");
                if action_tx
                    .send(Action::ModeChanged(DashboardMode::from(enabled)))
                    .is_err()
                {
                    break;
                }
            }
        }
    }
    debug!("edit mode forwarder shut down");
}
