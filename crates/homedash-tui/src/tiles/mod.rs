//! Tile widgets: one per configured dashboard tile.

mod dashdot;
mod service;

pub use dashdot::DashDotTile;
pub use service::ServiceTile;

use std::time::Instant;

use homedash_core::{DashDotInfo, QueryState, Tile};
use ratatui::{Frame, layout::Rect};
use url::Url;

use crate::action::Action;
use crate::data_bridge::TileContext;
use crate::theme::TileLook;

pub enum TileWidget {
    Service(ServiceTile),
    DashDot(DashDotTile),
}

impl TileWidget {
    /// Mount a widget for `tile` at grid position `index`. dash. tiles
    /// start their status watcher immediately.
    pub fn mount(tile: &Tile, index: usize, ctx: &TileContext) -> Self {
        match tile {
            Tile::Service(service) => Self::Service(ServiceTile::new(service.clone())),
            Tile::DashDot(module) => Self::DashDot(DashDotTile::mount(module.clone(), index, ctx)),
        }
    }

    /// Apply an edited configuration. Only a changed dash. target restarts
    /// the status watcher.
    pub fn reconfigure(&mut self, tile: &Tile, index: usize, ctx: &TileContext) {
        match (self, tile) {
            (Self::DashDot(widget), Tile::DashDot(module)) => {
                widget.reconfigure(module.clone(), ctx);
            }
            (this, tile) => *this = Self::mount(tile, index, ctx),
        }
    }

    /// Deliver a status result. Returns false if it came from a stale watcher.
    pub fn apply_status(
        &mut self,
        watch: u64,
        state: QueryState<DashDotInfo>,
        resolved_at: Option<Instant>,
    ) -> bool {
        match self {
            Self::DashDot(tile) => tile.apply_status(watch, state, resolved_at),
            Self::Service(_) => false,
        }
    }

    /// Action for activating this tile, honouring the edit-mode flag.
    pub fn activate(&self, edit_mode: bool) -> Option<Action> {
        match self {
            Self::Service(tile) => tile.activate(edit_mode),
            Self::DashDot(_) => None,
        }
    }

    /// dash. instance this tile watches, if any.
    pub fn status_target(&self) -> Option<&Url> {
        match self {
            Self::DashDot(tile) => tile.target(),
            Self::Service(_) => None,
        }
    }

    /// Restart the status watcher of a dash. tile.
    pub fn restart(&mut self, ctx: &TileContext) {
        if let Self::DashDot(tile) = self {
            tile.restart(ctx);
        }
    }

    pub fn tick(&mut self) {
        if let Self::DashDot(tile) = self {
            tile.tick();
        }
    }

    /// Rows this tile would like, borders included.
    pub fn preferred_height(&self, ctx: &TileContext) -> u16 {
        match self {
            Self::Service(tile) => tile.preferred_height(),
            Self::DashDot(tile) => tile.preferred_height(ctx.catalog.as_ref()),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, look: TileLook, ctx: &TileContext) {
        match self {
            Self::Service(tile) => tile.render(frame, area, look),
            Self::DashDot(tile) => tile.render(frame, area, look, ctx.catalog.as_ref()),
        }
    }
}
