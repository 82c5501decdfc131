//! Tile board shared by both views: mounted tiles, grid packing,
//! selection and scrolling.

use std::collections::BTreeSet;
use std::time::Instant;

use homedash_core::{DashDotInfo, Dashboard, QueryState, Tile};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::Paragraph,
};

use crate::data_bridge::TileContext;
use crate::theme::{self, TileLook};
use crate::tiles::TileWidget;
use crate::widgets::grid::{self, Direction, GridRow};

pub struct Board {
    columns: u16,
    tiles: Vec<TileWidget>,
    rows: Vec<GridRow>,
    selected: usize,
}

impl Board {
    /// Mount every tile of `dashboard`.
    pub fn mount(dashboard: &Dashboard, ctx: &TileContext) -> Self {
        let tiles = dashboard
            .tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| TileWidget::mount(tile, index, ctx))
            .collect();
        let spans: Vec<u16> = dashboard.tiles.iter().map(Tile::span).collect();
        Self {
            columns: dashboard.columns,
            tiles,
            rows: grid::pack_rows(&spans, dashboard.columns),
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn tile(&self, index: usize) -> Option<&TileWidget> {
        self.tiles.get(index)
    }

    /// Status of a dash. tile, `None` for other tiles.
    pub fn status(&self, index: usize) -> Option<&QueryState<DashDotInfo>> {
        match self.tiles.get(index)? {
            TileWidget::DashDot(tile) => Some(tile.state()),
            TileWidget::Service(_) => None,
        }
    }

    pub fn watch_id(&self, index: usize) -> Option<u64> {
        match self.tiles.get(index)? {
            TileWidget::DashDot(tile) => Some(tile.watch_id()),
            TileWidget::Service(_) => None,
        }
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selected = grid::neighbour(&self.rows, self.selected, direction);
    }

    pub fn apply_status(
        &mut self,
        watch: u64,
        tile: usize,
        state: QueryState<DashDotInfo>,
        resolved_at: Option<Instant>,
    ) -> bool {
        self.tiles
            .get_mut(tile)
            .is_some_and(|widget| widget.apply_status(watch, state, resolved_at))
    }

    pub fn reconfigure(&mut self, index: usize, tile: &Tile, ctx: &TileContext) {
        if let Some(widget) = self.tiles.get_mut(index) {
            widget.reconfigure(tile, index, ctx);
        }
    }

    /// Mark each distinct target stale once, then restart every watcher so
    /// tiles sharing a target join one fetch.
    pub fn refresh(&mut self, ctx: &TileContext) {
        let targets: BTreeSet<_> = self
            .tiles
            .iter()
            .filter_map(TileWidget::status_target)
            .collect();
        for target in targets {
            ctx.status.refetch(target);
        }
        for tile in &mut self.tiles {
            tile.restart(ctx);
        }
    }

    pub fn tick(&mut self) {
        for tile in &mut self.tiles {
            tile.tick();
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, inert: bool, ctx: &TileContext) {
        if self.tiles.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::styled("  No tiles configured.", theme::muted_text()),
                Line::styled(
                    "  Add [[dashboard.tiles]] entries to the config file.",
                    theme::key_hint(),
                ),
            ]);
            frame.render_widget(hint, area);
            return;
        }

        let heights: Vec<u16> = self
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .filter_map(|c| self.tiles.get(c.tile))
                    .map(|t| t.preferred_height(ctx))
                    .max()
                    .unwrap_or(3)
            })
            .collect();

        let first = self.first_visible_row(&heights, area.height);
        let mut y = area.y;
        for (row, height) in self.rows.iter().zip(&heights).skip(first) {
            if y >= area.bottom() {
                break;
            }
            let height = (*height).min(area.bottom() - y);
            let row_area = Rect::new(area.x, y, area.width, height);
            for cell in &row.cells {
                let Some(tile) = self.tiles.get(cell.tile) else {
                    continue;
                };
                let look = TileLook {
                    selected: cell.tile == self.selected,
                    inert,
                    failed: false,
                };
                tile.render(frame, grid::cell_rect(row_area, self.columns, *cell), look, ctx);
            }
            y += height;
        }
    }

    /// Scroll so the selected row is fully visible when possible.
    fn first_visible_row(&self, heights: &[u16], available: u16) -> usize {
        let Some(selected_row) = grid::row_of(&self.rows, self.selected) else {
            return 0;
        };
        let mut first = 0;
        loop {
            let used: u32 = heights
                .iter()
                .skip(first)
                .take(selected_row + 1 - first)
                .map(|h| u32::from(*h))
                .sum();
            if used <= u32::from(available) || first == selected_row {
                return first;
            }
            first += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use homedash_core::DashDotModule;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::action::Action;
    use crate::data_bridge::test_support;

    const TILES: usize = 8;

    fn same_target_dashboard() -> Dashboard {
        let module = DashDotModule {
            url: Some("http://dash.lan:3001".parse().unwrap()),
            ..DashDotModule::default()
        };
        Dashboard {
            columns: 4,
            tiles: (0..TILES).map(|_| Tile::DashDot(module.clone())).collect(),
        }
    }

    /// Apply status actions until every tile has a current result.
    async fn settle(rx: &mut mpsc::UnboundedReceiver<Action>, board: &mut Board) {
        let mut delivered = 0;
        while delivered < TILES {
            if let Action::StatusResolved {
                watch,
                tile,
                state,
                resolved_at,
            } = rx.recv().await.unwrap()
            {
                if board.apply_status(watch, tile, state, resolved_at) {
                    delivered += 1;
                }
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn refresh_fetches_a_shared_target_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/modules/dashdot"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        let (ctx, _writer, mut rx) =
            test_support::context_with(test_support::status_via(&server.uri()));

        let mut board = Board::mount(&same_target_dashboard(), &ctx);
        settle(&mut rx, &mut board).await;
        assert_eq!(server.received_requests().await.unwrap().len(), 1);

        for round in 2..=4 {
            board.refresh(&ctx);
            settle(&mut rx, &mut board).await;
            assert_eq!(server.received_requests().await.unwrap().len(), round);
        }
        assert!((0..TILES).all(|i| board.status(i).unwrap().is_ready()));
    }

    #[tokio::test]
    async fn refresh_restarts_every_watcher() {
        let (ctx, _writer, _rx) = test_support::context();
        let mut board = Board::mount(&same_target_dashboard(), &ctx);
        let before: Vec<_> = (0..TILES).map(|i| board.watch_id(i)).collect();

        board.refresh(&ctx);

        for (i, old) in before.into_iter().enumerate() {
            assert_ne!(board.watch_id(i), old);
            assert!(board.status(i).unwrap().is_pending());
        }
    }
}
