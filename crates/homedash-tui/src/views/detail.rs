//! Read-only dashboard: tiles are live and activatable.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use homedash_core::Dashboard;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::TileContext;
use crate::views::board::Board;
use crate::widgets::grid::Direction;

pub struct DetailView {
    ctx: TileContext,
    board: Board,
}

impl DetailView {
    pub fn mount(dashboard: &Dashboard, ctx: TileContext) -> Self {
        let board = Board::mount(dashboard, &ctx);
        Self { ctx, board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

pub(super) fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        _ => None,
    }
}

impl Component for DetailView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(direction) = direction_for(key.code) {
            self.board.move_selection(direction);
            return Ok(None);
        }
        if key.code == KeyCode::Enter {
            let edit_mode = self.ctx.edit_mode.get();
            return Ok(self
                .board
                .tile(self.board.selected())
                .and_then(|tile| tile.activate(edit_mode)));
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatusResolved {
                watch,
                tile,
                state,
                resolved_at,
            } => {
                self.board
                    .apply_status(*watch, *tile, state.clone(), *resolved_at);
            }
            Action::Tick => self.board.tick(),
            Action::Refresh => self.board.refresh(&self.ctx),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        self.board.render(frame, area, false, &self.ctx);
    }

    fn key_hints(&self) -> &'static str {
        "←↓↑→ move  ⏎ open  r refresh  e edit"
    }

    fn id(&self) -> &str {
        "detail"
    }
}
