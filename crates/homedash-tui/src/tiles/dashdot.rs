use std::time::Instant;

use homedash_core::{
    Catalog, DashDotInfo, DashDotModule, DashDotView, GraphDescriptor, GraphRow, GraphTheme,
    NetworkSummary, QueryState, StorageSummary, TileBody, Translator, derive_view, graph_url,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::warn;
use url::Url;

use crate::data_bridge::{StatusWatch, TileContext, spawn_status_watch};
use crate::theme::{self, TileLook};
use crate::widgets::fmt::{fmt_age, fmt_bits_rate, fmt_bytes};

const GRAPH_HEIGHT: u16 = 3;

/// Live dash. integration tile.
pub struct DashDotTile {
    index: usize,
    module: DashDotModule,
    state: QueryState<DashDotInfo>,
    resolved_at: Option<Instant>,
    theme: GraphTheme,
    throbber: ThrobberState,
    watch: StatusWatch,
}

impl DashDotTile {
    pub fn mount(module: DashDotModule, index: usize, ctx: &TileContext) -> Self {
        let watch = spawn_status_watch(ctx, index, module.url.clone());
        Self {
            index,
            module,
            state: QueryState::Pending,
            resolved_at: None,
            theme: ctx.graph_theme,
            throbber: ThrobberState::default(),
            watch,
        }
    }

    pub fn state(&self) -> &QueryState<DashDotInfo> {
        &self.state
    }

    pub fn watch_id(&self) -> u64 {
        self.watch.id
    }

    pub fn target(&self) -> Option<&Url> {
        self.module.url.as_ref()
    }

    pub fn reconfigure(&mut self, module: DashDotModule, ctx: &TileContext) {
        let retarget = module.url != self.module.url;
        self.module = module;
        if retarget {
            self.restart(ctx);
        }
    }

    /// Start a fresh watcher. Cached status is reused unless it was marked
    /// stale beforehand.
    pub fn restart(&mut self, ctx: &TileContext) {
        // Replacing the handle drops the old watcher.
        self.watch = spawn_status_watch(ctx, self.index, self.module.url.clone());
        self.state = QueryState::Pending;
        self.resolved_at = None;
    }

    pub fn apply_status(
        &mut self,
        watch: u64,
        state: QueryState<DashDotInfo>,
        resolved_at: Option<Instant>,
    ) -> bool {
        if watch != self.watch.id {
            return false;
        }
        if let QueryState::Failed(err) = &state {
            warn!(tile = self.index, error = %err, "dash. status unavailable");
        }
        self.state = state;
        self.resolved_at = resolved_at;
        true
    }

    pub fn tick(&mut self) {
        if self.state.is_pending() {
            self.throbber.calc_next();
        }
    }

    pub fn view(&self, catalog: &Catalog) -> DashDotView {
        derive_view(&self.module, self.state.is_ready(), catalog)
    }

    pub fn preferred_height(&self, catalog: &Catalog) -> u16 {
        let view = self.view(catalog);
        let body = match view.body {
            TileBody::Graphs => {
                let rows = u16::try_from(view.graph_rows().len()).unwrap_or(u16::MAX);
                u16::from(view.has_compact_strip()) + rows.saturating_mul(GRAPH_HEIGHT) + 1
            }
            TileBody::NoService | TileBody::NoInformation => 2,
        };
        body + 2
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, look: TileLook, catalog: &Catalog) {
        let view = self.view(catalog);
        let look = TileLook {
            failed: self.state.is_failed(),
            ..look
        };

        let mut title = vec![Span::styled(format!(" {} ", view.title), theme::tile_title(look))];
        if look.failed {
            title.push(Span::styled("✗ unreachable ", Style::default().fg(theme::RED)));
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::tile_border(look))
            .title(Line::from(title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match (view.body, self.state.data(), &self.module.url) {
            (TileBody::Graphs, Some(info), Some(base)) => {
                self.render_graphs(frame, inner, &view, info, base, catalog);
            }
            (body, _, _) => self.render_message(frame, inner, body, catalog),
        }
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, body: TileBody, catalog: &Catalog) {
        let message = body
            .message_key()
            .map(|key| catalog.translate(key))
            .unwrap_or_default();

        let pending = self.state.is_pending() && self.module.url.is_some();
        if !pending {
            let paragraph = Paragraph::new(Span::styled(message, theme::muted_text()))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let [spinner_area, text_area] =
            Layout::horizontal([Constraint::Length(2), Constraint::Min(1)]).areas(area);
        let throbber = Throbber::default()
            .throbber_style(Style::default().fg(theme::ACCENT));
        frame.render_stateful_widget(throbber, spinner_area, &mut self.throbber.clone());
        frame.render_widget(
            Paragraph::new(Span::styled(message, theme::muted_text())).wrap(Wrap { trim: true }),
            text_area,
        );
    }

    fn render_graphs(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: &DashDotView,
        info: &DashDotInfo,
        base: &Url,
        catalog: &Catalog,
    ) {
        let rows = view.graph_rows();
        let mut constraints = Vec::with_capacity(rows.len() + 2);
        if view.has_compact_strip() {
            constraints.push(Constraint::Length(1));
        }
        constraints.extend(rows.iter().map(|_| Constraint::Length(GRAPH_HEIGHT)));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let areas = Layout::vertical(constraints).split(area);
        let mut areas = areas.iter().copied();

        if view.has_compact_strip() {
            if let Some(strip) = areas.next() {
                frame.render_widget(Paragraph::new(compact_line(view, info, catalog)), strip);
            }
        }

        for row in &rows {
            let Some(row_area) = areas.next() else { break };
            match row {
                GraphRow::Pair(left, right) => {
                    let [l, r] = Layout::horizontal([Constraint::Ratio(1, 2); 2]).areas(row_area);
                    render_graph(frame, l, left, base, self.theme);
                    render_graph(frame, r, right, base, self.theme);
                }
                GraphRow::Full(graph) => render_graph(frame, row_area, graph, base, self.theme),
            }
        }

        if let (Some(footer), Some(at)) = (areas.next(), self.resolved_at) {
            let line = Line::styled(
                format!("updated {} ago", fmt_age(at.elapsed())),
                theme::key_hint(),
            );
            frame.render_widget(Paragraph::new(line), footer);
        }
    }
}

/// Storage and network summary for compact view.
fn compact_line(view: &DashDotView, info: &DashDotInfo, catalog: &Catalog) -> Line<'static> {
    let mut spans = Vec::new();
    if view.compact_storage_visible {
        let storage = StorageSummary::from_info(info);
        spans.push(Span::styled(
            format!("{} ", catalog.translate("card.graphs.storage.label")),
            theme::body_text(),
        ));
        spans.push(Span::styled(fmt_bytes(storage.total_bytes), theme::value_text()));
        spans.push(Span::styled(
            format!(" ({} volumes)  ", storage.volumes),
            theme::key_hint(),
        ));
    }
    if view.compact_network_visible {
        let network = NetworkSummary::from_info(info);
        spans.push(Span::styled(
            format!("{} ", catalog.translate("card.graphs.network.label")),
            theme::body_text(),
        ));
        spans.push(Span::styled(
            format!(
                "↑ {}  ↓ {}",
                fmt_bits_rate(network.up_bps),
                fmt_bits_rate(network.down_bps)
            ),
            theme::value_text(),
        ));
    }
    Line::from(spans)
}

fn render_graph(
    frame: &mut Frame,
    area: Rect,
    graph: &GraphDescriptor,
    base: &Url,
    theme_name: GraphTheme,
) {
    let mut title = vec![Span::styled(format!(" {} ", graph.name), theme::body_text())];
    if graph.is_multi_view {
        title.push(Span::styled("multi ", theme::key_hint()));
    }
    let block = Block::bordered()
        .border_type(BorderType::Plain)
        .border_style(theme::border_default())
        .title(Line::from(title));
    let url = graph_url(base, graph, theme_name);
    frame.render_widget(
        Paragraph::new(Span::styled(url.to_string(), theme::link_text())).block(block),
        area,
    );
}
