//! Application core: event loop, mode switch, action dispatch.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use homedash_config::{Config, save_dashboard_to};
use homedash_core::{Dashboard, DashboardMode, EditModeWriter, edit_mode_store};

use crate::action::{Action, Notification, NotificationLevel};
use crate::data_bridge::{Status, TileContext, forward_edit_mode};
use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;
use crate::views::DashboardView;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);
const PRUNE_EVERY: Duration = Duration::from_secs(60);

/// Top-level application state and event loop.
pub struct App {
    ctx: TileContext,
    config_path: PathBuf,
    /// Session dashboard; edits land here before they are saved.
    dashboard: Dashboard,
    /// Sole writer of the edit-mode flag.
    edit_mode: EditModeWriter,
    /// Mounted composition for the current mode.
    view: DashboardView,
    running: bool,
    help_visible: bool,
    unsaved: bool,
    notification: Option<(Notification, Instant)>,
    last_prune: Instant,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for background bridge tasks.
    bridge_cancel: CancellationToken,
}

impl App {
    /// Build the app and mount the detail view. Tile watchers start here,
    /// so this must run inside a tokio runtime.
    pub fn new(
        config: Config,
        config_path: PathBuf,
        status: Status,
        refresh_interval: Duration,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (edit_mode, reader) = edit_mode_store();
        let ctx = TileContext {
            status,
            catalog: Arc::new(config.catalog()),
            graph_theme: config.appearance.graph_theme,
            edit_mode: reader,
            refresh_interval,
            action_tx: action_tx.clone(),
        };
        let dashboard = config.dashboard.clone();
        let view = DashboardView::mount(DashboardMode::Detail, &dashboard, &ctx);

        Self {
            ctx,
            config_path,
            dashboard,
            edit_mode,
            view,
            running: true,
            help_visible: false,
            unsaved: false,
            notification: None,
            last_prune: Instant::now(),
            action_tx,
            action_rx,
            bridge_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        tokio::spawn(forward_edit_mode(
            self.ctx.edit_mode.clone(),
            self.action_tx.clone(),
            self.bridge_cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(tiles = self.dashboard.tiles.len(), "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.bridge_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here; the
    /// rest go to the mounted view.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.view.component().captures_input() {
            return self.view.component_mut().handle_key_event(key);
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Char('e') => return Ok(Some(Action::ToggleEditMode)),
            KeyCode::Char('r') => return Ok(Some(Action::Refresh)),
            KeyCode::Esc if self.notification.is_some() => {
                return Ok(Some(Action::DismissNotification));
            }
            _ => {}
        }

        self.view.component_mut().handle_key_event(key)
    }

    /// Process a single action: update app state and propagate to the view.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render => {}

            Action::Resize(w, h) => debug!(width = w, height = h, "terminal resized"),

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                if self.last_prune.elapsed() >= PRUNE_EVERY {
                    let evicted = self.ctx.status.cache().prune();
                    if evicted > 0 {
                        debug!(evicted, "pruned idle status queries");
                    }
                    self.last_prune = Instant::now();
                }
                self.forward(action)?;
            }

            Action::ToggleEditMode => {
                let enabled = self.edit_mode.toggle();
                debug!(enabled, "edit mode toggled");
            }

            Action::ModeChanged(mode) => self.switch_view(*mode),

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),

            Action::DismissNotification => self.notification = None,

            Action::Refresh => {
                self.forward(action)?;
                self.action_tx
                    .send(Action::Notify(Notification::info("Refreshing status")))?;
            }

            Action::OpenUrl { url, new_tab } => {
                let notification = match open::that_detached(url.as_str()) {
                    Ok(()) => {
                        info!(%url, new_tab, "opened service");
                        let suffix = if *new_tab { " in a new window" } else { "" };
                        Notification::success(format!("Opened {url}{suffix}"))
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "failed to open service");
                        Notification::error(format!("Cannot open {url}: {e}"))
                    }
                };
                self.action_tx.send(Action::Notify(notification))?;
            }

            Action::DashboardEdited(dashboard) => {
                self.dashboard = dashboard.clone();
                self.unsaved = true;
            }

            Action::SaveDashboard(dashboard) => {
                self.dashboard = dashboard.clone();
                let notification = match save_dashboard_to(dashboard, &self.config_path) {
                    Ok(()) => {
                        self.unsaved = false;
                        info!(path = %self.config_path.display(), "dashboard saved");
                        Notification::success(format!("Saved {}", self.config_path.display()))
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to save dashboard");
                        Notification::error(format!("Save failed: {e}"))
                    }
                };
                self.action_tx.send(Action::Notify(notification))?;
            }

            Action::StatusResolved { .. } => self.forward(action)?,
        }

        Ok(())
    }

    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.view.component_mut().update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    /// Replace the mounted view with a fresh one for `mode`. The old view is
    /// dropped first, which stops its tile watchers.
    fn switch_view(&mut self, mode: DashboardMode) {
        if self.view.mode() == mode {
            return;
        }
        debug!(from = self.view.component().id(), to = %mode, "switching view");
        self.view = DashboardView::mount(mode, &self.dashboard, &self.ctx);
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);
        self.view.component().render(frame, content_area);
        self.render_status_bar(frame, status_area);

        if let Some((ref notif, _)) = self.notification {
            render_notification(frame, area, notif);
        }

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let edit = self.view.mode().is_edit();
        let mut spans = vec![
            Span::styled(" homedash ", theme::title_style()),
            Span::styled(
                format!(" {} ", self.view.mode().label().to_uppercase()),
                theme::mode_badge(edit),
            ),
            Span::styled(
                format!("  {} tiles", self.dashboard.tiles.len()),
                theme::key_hint(),
            ),
        ];
        if self.unsaved {
            spans.push(Span::styled(
                "  ● unsaved (w to save)",
                Style::default().fg(theme::YELLOW),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(format!(" {}", self.view.component().key_hints()), theme::key_hint()),
            Span::styled(" │ ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Render a notification toast in the bottom-right corner.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16.min(area.height);

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 1); // above status bar
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (border_color, icon) = match notif.level {
        NotificationLevel::Success => (theme::GREEN, "✓"),
        NotificationLevel::Error => (theme::RED, "✗"),
        NotificationLevel::Warning => (theme::YELLOW, "!"),
        NotificationLevel::Info => (theme::CYAN, "·"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Render the help overlay centered on screen.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 56u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.width.saturating_sub(help_width) / 2;
    let y = area.height.saturating_sub(help_height) / 2;
    let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };
    let heading = |text: &'static str| Line::styled(format!("  {text}"), Style::default().fg(theme::CYAN));

    let help_text = vec![
        Line::from(""),
        heading("Dashboard"),
        entry("←↓↑→ hjkl", "Move selection"),
        entry("Enter", "Open service"),
        entry("r", "Refresh status"),
        entry("e", "Toggle edit mode"),
        Line::from(""),
        heading("Edit mode"),
        entry("c", "Compact view"),
        entry("m / s", "CPU / storage multi-view"),
        entry("1-5", "Toggle graph"),
        entry("u", "Edit dash. URL"),
        entry("w", "Save to config file"),
        Line::from(""),
        heading("Global"),
        entry("?", "This help"),
        entry("q", "Quit"),
        Line::from(""),
        Line::styled("                    Esc or ? to close", theme::key_hint()),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEvent;
    use homedash_core::{
        DashDotInfo, DashDotModule, GraphId, QueryState, Service, StorageInfo, StorageVolume,
        Tile,
    };
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::data_bridge::test_support;

    fn dashboard(dash_url: Option<&str>) -> Dashboard {
        Dashboard {
            columns: 4,
            tiles: vec![
                Tile::Service(Service::new(
                    "Jellyfin",
                    Some("http://media.lan:8096".parse().unwrap()),
                )),
                Tile::DashDot(DashDotModule {
                    url: dash_url.map(|u| u.parse().unwrap()),
                    graphs: vec![GraphId::Storage, GraphId::Network, GraphId::Cpu],
                    is_compact_view: true,
                    ..DashDotModule::default()
                }),
            ],
        }
    }

    fn app(dash_url: Option<&str>, dir: &tempfile::TempDir) -> App {
        let config = Config {
            dashboard: dashboard(dash_url),
            ..Config::default()
        };
        App::new(
            config,
            dir.path().join("config.toml"),
            test_support::status(),
            Duration::from_secs(30),
        )
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn set_mode(app: &mut App, mode: DashboardMode) {
        app.process_action(&Action::ToggleEditMode).unwrap();
        assert_eq!(app.edit_mode.get(), mode.is_edit());
        // The edit-mode forwarder is not running in tests.
        app.process_action(&Action::ModeChanged(mode)).unwrap();
    }

    fn ready(volumes: &[u64]) -> QueryState<DashDotInfo> {
        QueryState::Ready(Arc::new(DashDotInfo {
            storage: StorageInfo {
                layout: volumes.iter().map(|&size| StorageVolume { size }).collect(),
            },
            ..DashDotInfo::default()
        }))
    }

    #[tokio::test]
    async fn detail_view_renders_tiles() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(None, &dir);
        let text = screen(&app);

        assert!(text.contains("DETAIL"));
        assert!(text.contains("Jellyfin"));
        assert!(text.contains("http://media.lan:8096/"));
        assert!(text.contains("No dash. service found"));
    }

    #[tokio::test]
    async fn pending_status_shows_no_information() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(Some("http://dash.lan:3001"), &dir);
        let text = screen(&app);

        assert!(text.contains("Cannot acquire information"));
        assert!(!text.contains("singleGraphMode"));
    }

    #[tokio::test]
    async fn resolved_status_renders_graphs_and_compact_strip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(Some("http://dash.lan:3001"), &dir);
        let DashboardView::Detail(view) = &app.view else {
            panic!("starts in detail mode");
        };
        let watch = view.board().watch_id(1).unwrap();

        let fetched = Instant::now().checked_sub(Duration::from_secs(90)).unwrap();
        app.process_action(&Action::StatusResolved {
            watch,
            tile: 1,
            state: ready(&[1_000, 24]),
            resolved_at: Some(fetched),
        })
        .unwrap();
        let text = screen(&app);

        assert!(text.contains("Storage:"));
        assert!(text.contains("(2 volumes)"));
        assert!(text.contains("CPU"));
        assert!(text.contains("graph=cpu"));
        assert!(!text.contains("graph=network"));
        // Age of the cached value, not of the delivery.
        assert!(text.contains("updated 1m 30s ago"));
    }

    #[tokio::test]
    async fn edit_toggle_swaps_the_composition() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(None, &dir);

        set_mode(&mut app, DashboardMode::Edit);
        assert!(matches!(app.view, DashboardView::Edit(_)));
        let text = screen(&app);
        assert!(text.contains("EDIT"));
        assert!(text.contains("Settings"));

        set_mode(&mut app, DashboardMode::Detail);
        assert!(matches!(app.view, DashboardView::Detail(_)));
        assert!(!screen(&app).contains("Settings"));
    }

    #[tokio::test]
    async fn result_for_unmounted_tile_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(Some("http://dash.lan:3001"), &dir);
        let DashboardView::Detail(view) = &app.view else {
            panic!("starts in detail mode");
        };
        let old_watch = view.board().watch_id(1).unwrap();

        set_mode(&mut app, DashboardMode::Edit);
        app.process_action(&Action::StatusResolved {
            watch: old_watch,
            tile: 1,
            state: ready(&[42]),
            resolved_at: None,
        })
        .unwrap();

        let DashboardView::Edit(view) = &app.view else {
            panic!("edit view mounted");
        };
        assert_ne!(view.board().watch_id(1), Some(old_watch));
        assert!(view.board().status(1).unwrap().is_pending());
    }

    #[tokio::test]
    async fn enter_navigates_only_in_detail_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(None, &dir);

        let action = app.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        let Some(Action::OpenUrl { url, new_tab }) = action else {
            panic!("expected navigation, got {action:?}");
        };
        assert_eq!(url.as_str(), "http://media.lan:8096/");
        assert!(new_tab);

        set_mode(&mut app, DashboardMode::Edit);
        let action = app.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert!(action.is_none());
    }

    #[tokio::test]
    async fn settings_edits_are_saved_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(None, &dir);
        set_mode(&mut app, DashboardMode::Edit);

        // Select the dash. tile, then turn compact view off and add the GPU graph.
        assert!(app.handle_key_event(key('l')).unwrap().is_none());
        for c in ['c', '5'] {
            let action = app.handle_key_event(key(c)).unwrap().unwrap();
            assert!(matches!(action, Action::DashboardEdited(_)));
            app.process_action(&action).unwrap();
        }
        assert!(app.unsaved);
        assert!(screen(&app).contains("unsaved"));

        let save = app.handle_key_event(key('w')).unwrap().unwrap();
        app.process_action(&save).unwrap();
        assert!(!app.unsaved);

        let saved = homedash_config::load_config_from(&dir.path().join("config.toml")).unwrap();
        let Some(Tile::DashDot(module)) = saved.dashboard.tiles.get(1) else {
            panic!("dash. tile persisted");
        };
        assert!(!module.is_compact_view);
        assert_eq!(
            module.graphs,
            vec![GraphId::Storage, GraphId::Network, GraphId::Cpu, GraphId::Gpu]
        );
    }

    #[tokio::test]
    async fn saving_keeps_session_overrides_out_of_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let on_disk = Config {
            proxy: homedash_config::ProxySettings {
                url: "https://home.lan".into(),
                ..homedash_config::ProxySettings::default()
            },
            dashboard: dashboard(None),
            ..Config::default()
        };
        homedash_config::save_config_to(&on_disk, &path).unwrap();

        // As if started with `--proxy`.
        let mut session = on_disk.clone();
        session.proxy.url = "http://override.lan:7575".into();
        let mut app = App::new(
            session,
            path.clone(),
            test_support::status(),
            Duration::from_secs(30),
        );
        set_mode(&mut app, DashboardMode::Edit);
        app.handle_key_event(key('l')).unwrap();
        let edit = app.handle_key_event(key('c')).unwrap().unwrap();
        app.process_action(&edit).unwrap();
        let save = app.handle_key_event(key('w')).unwrap().unwrap();
        app.process_action(&save).unwrap();

        let saved = homedash_config::load_file_config(&path).unwrap();
        assert_eq!(saved.proxy.url, "https://home.lan");
        let Some(Tile::DashDot(module)) = saved.dashboard.tiles.get(1) else {
            panic!("dash. tile persisted");
        };
        assert!(!module.is_compact_view);
    }

    #[tokio::test]
    async fn url_entry_captures_global_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(None, &dir);
        set_mode(&mut app, DashboardMode::Edit);
        app.handle_key_event(key('l')).unwrap();
        app.handle_key_event(key('u')).unwrap();

        // 'q' and 'e' are typed, not interpreted.
        for c in "http://dash.lan:3001".chars() {
            assert!(app.handle_key_event(key(c)).unwrap().is_none());
        }
        assert!(app.running);
        let action = app
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap()
            .unwrap();
        let Action::DashboardEdited(dashboard) = action else {
            panic!("expected an edit");
        };
        let Some(Tile::DashDot(module)) = dashboard.tiles.get(1) else {
            panic!("dash. tile");
        };
        assert_eq!(
            module.url.as_ref().map(url::Url::as_str),
            Some("http://dash.lan:3001/")
        );
    }

    #[tokio::test]
    async fn help_overlay_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(None, &dir);
        let action = app.handle_key_event(key('?')).unwrap().unwrap();
        app.process_action(&action).unwrap();
        assert!(screen(&app).contains("Keyboard Shortcuts"));

        // Other keys are swallowed while help is open.
        assert!(app.handle_key_event(key('q')).unwrap().is_none());
        let close = app.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap().unwrap();
        app.process_action(&close).unwrap();
        assert!(!screen(&app).contains("Keyboard Shortcuts"));
    }
}
