// ── Edit-mode store ──
//
// Session-wide boolean with exactly one writer and many readers, carried
// by a `watch` channel so readers can await changes.

use tokio::sync::watch;
use tracing::debug;

use crate::mode::DashboardMode;

/// Create the edit-mode cell, initially disabled.
///
/// The writer goes to the editing workflow; readers are handed to whoever
/// renders. The writer is intentionally not `Clone`.
pub fn edit_mode_store() -> (EditModeWriter, EditModeReader) {
    let (tx, rx) = watch::channel(false);
    (EditModeWriter { tx }, EditModeReader { rx })
}

/// The single mutator of the edit-mode flag.
#[derive(Debug)]
pub struct EditModeWriter {
    tx: watch::Sender<bool>,
}

impl EditModeWriter {
    /// Set the flag. Returns `true` if the value changed; readers are only
    /// notified on an actual change.
    pub fn set(&self, enabled: bool) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == enabled {
                false
            } else {
                *current = enabled;
                true
            }
        });
        if changed {
            debug!(enabled, "edit mode changed");
        }
        changed
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        let next = !*self.tx.borrow();
        self.set(next);
        next
    }

    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    /// Hand out another reader.
    pub fn reader(&self) -> EditModeReader {
        EditModeReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read-only view of the edit-mode flag.
#[derive(Debug, Clone)]
pub struct EditModeReader {
    rx: watch::Receiver<bool>,
}

impl EditModeReader {
    pub fn get(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn mode(&self) -> DashboardMode {
        DashboardMode::from_edit_flag(self.get())
    }

    /// Wait for the next change and return the new value.
    /// Returns `None` once the writer is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
