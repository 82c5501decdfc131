//! Edit-mode dashboard: tiles render inert next to a settings editor for
//! the selected dash. tile.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use homedash_core::{
    Catalog, DashDotModule, DashDotSetting, Dashboard, GraphId, Tile, Translator,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use url::Url;

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::data_bridge::TileContext;
use crate::theme;
use crate::views::board::Board;
use crate::views::detail::direction_for;

pub struct EditView {
    ctx: TileContext,
    board: Board,
    /// Working copy; every change is reported as `DashboardEdited`.
    dashboard: Dashboard,
    url_input: Option<String>,
}

impl EditView {
    pub fn mount(dashboard: Dashboard, ctx: TileContext) -> Self {
        let board = Board::mount(&dashboard, &ctx);
        Self {
            ctx,
            board,
            dashboard,
            url_input: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn selected_module(&self) -> Option<&DashDotModule> {
        match self.dashboard.tiles.get(self.board.selected()) {
            Some(Tile::DashDot(module)) => Some(module),
            _ => None,
        }
    }

    /// Apply `edit` to the selected dash. tile and remount it.
    fn edit_selected(&mut self, edit: impl FnOnce(&mut DashDotModule)) -> Option<Action> {
        let index = self.board.selected();
        let Some(module) = self.dashboard.dashdot_mut(index) else {
            return Some(Action::Notify(Notification::info(
                "Select a dash. tile to edit its settings",
            )));
        };
        edit(module);
        if let Some(tile) = self.dashboard.tiles.get(index) {
            self.board.reconfigure(index, tile, &self.ctx);
        }
        Some(Action::DashboardEdited(self.dashboard.clone()))
    }

    fn toggle_setting(&mut self, setting: DashDotSetting) -> Option<Action> {
        self.edit_selected(|module| match setting {
            DashDotSetting::CpuMultiView => module.is_cpu_multi_view = !module.is_cpu_multi_view,
            DashDotSetting::StorageMultiView => {
                module.is_storage_multi_view = !module.is_storage_multi_view;
            }
            DashDotSetting::CompactView => module.is_compact_view = !module.is_compact_view,
            DashDotSetting::Graphs | DashDotSetting::Url => {}
        })
    }

    fn handle_url_input(&mut self, key: KeyEvent) -> Option<Action> {
        let input = self.url_input.as_mut()?;
        match key.code {
            KeyCode::Esc => self.url_input = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            KeyCode::Enter => {
                let raw = self.url_input.take().unwrap_or_default();
                let raw = raw.trim();
                let url = if raw.is_empty() {
                    None
                } else {
                    match raw.parse::<Url>() {
                        Ok(url) => Some(url),
                        Err(e) => {
                            return Some(Action::Notify(Notification::warning(format!(
                                "Invalid URL: {e}"
                            ))));
                        }
                    }
                };
                return self.edit_selected(|module| module.url = url);
            }
            _ => {}
        }
        None
    }

    fn render_settings(&self, frame: &mut Frame, area: Rect) {
        let catalog: &Catalog = self.ctx.catalog.as_ref();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .title(Line::styled(" Settings ", theme::title_style()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(module) = self.selected_module() else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    " Select a dash. tile to edit its settings.",
                    theme::muted_text(),
                )),
                inner,
            );
            return;
        };

        let mut lines = Vec::new();
        for setting in DashDotSetting::all() {
            let label = catalog.translate(setting.label_key());
            match setting {
                DashDotSetting::CpuMultiView => {
                    lines.push(flag_line('m', &label, module.is_cpu_multi_view));
                }
                DashDotSetting::StorageMultiView => {
                    lines.push(flag_line('s', &label, module.is_storage_multi_view));
                }
                DashDotSetting::CompactView => {
                    lines.push(flag_line('c', &label, module.is_compact_view));
                }
                DashDotSetting::Graphs => {
                    lines.push(Line::from(""));
                    lines.push(Line::styled(format!(" {label}"), theme::body_text()));
                    for (n, graph) in GraphId::all().enumerate() {
                        lines.push(graph_line(n + 1, graph, module.has_graph(graph)));
                    }
                }
                DashDotSetting::Url => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(vec![
                        Span::styled(" u ", theme::key_hint_key()),
                        Span::styled(label, theme::body_text()),
                    ]));
                    let value = match (&self.url_input, &module.url) {
                        (Some(input), _) => Span::styled(format!("   {input}▏"), theme::value_text()),
                        (None, Some(url)) => Span::styled(format!("   {url}"), theme::link_text()),
                        (None, None) => Span::styled("   not set", theme::muted_text()),
                    };
                    lines.push(Line::from(value));
                }
            }
        }
        if self.url_input.is_some() {
            lines.push(Line::styled("   ⏎ apply  esc cancel", theme::key_hint()));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn flag_line(key: char, label: &str, enabled: bool) -> Line<'static> {
    let mark = if enabled { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::styled(format!(" {key} "), theme::key_hint_key()),
        Span::styled(format!("{mark} "), theme::value_text()),
        Span::styled(label.to_owned(), theme::body_text()),
    ])
}

fn graph_line(number: usize, graph: GraphId, enabled: bool) -> Line<'static> {
    let mark = if enabled { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::styled(format!(" {number} "), theme::key_hint_key()),
        Span::styled(format!("{mark} "), theme::value_text()),
        Span::styled(graph.to_string(), theme::body_text()),
    ])
}

impl Component for EditView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.url_input.is_some() {
            return Ok(self.handle_url_input(key));
        }
        if let Some(direction) = direction_for(key.code) {
            self.board.move_selection(direction);
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Char('m') => self.toggle_setting(DashDotSetting::CpuMultiView),
            KeyCode::Char('s') => self.toggle_setting(DashDotSetting::StorageMultiView),
            KeyCode::Char('c') => self.toggle_setting(DashDotSetting::CompactView),
            KeyCode::Char(c @ '1'..='5') => {
                let n = c.to_digit(10).and_then(|d| usize::try_from(d).ok()).unwrap_or(1);
                GraphId::all()
                    .nth(n - 1)
                    .and_then(|graph| self.edit_selected(|module| module.toggle_graph(graph)))
            }
            KeyCode::Char('u') => {
                if let Some(module) = self.selected_module() {
                    self.url_input =
                        Some(module.url.as_ref().map(ToString::to_string).unwrap_or_default());
                    None
                } else {
                    self.edit_selected(|_| {})
                }
            }
            KeyCode::Char('w') => Some(Action::SaveDashboard(self.dashboard.clone())),
            // Tiles are inert while editing.
            KeyCode::Enter => {
                let edit_mode = self.ctx.edit_mode.get();
                self.board
                    .tile(self.board.selected())
                    .and_then(|tile| tile.activate(edit_mode))
            }
            _ => None,
        };
        Ok(action)
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
        let [board_area, settings_area] =
            Layout::horizontal([Constraint::Min(30), Constraint::Length(40)]).areas(area);
        self.board.render(frame, board_area, true, &self.ctx);
        self.render_settings(frame, settings_area);
    }

    fn captures_input(&self) -> bool {
        self.url_input.is_some()
    }

    fn key_hints(&self) -> &'static str {
        "c/m/s toggle  1-5 graphs  u url  w save  e done"
    }

    fn id(&self) -> &str {
        "edit"
    }
}
