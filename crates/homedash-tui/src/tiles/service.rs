use homedash_core::{Service, TileAction, resolve_action};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::action::Action;
use crate::theme::{self, TileLook};

/// Shortcut tile for a configured service.
pub struct ServiceTile {
    service: Service,
}

impl ServiceTile {
    pub fn new(service: Service) -> Self {
        Self { service }
    }

    pub fn activate(&self, edit_mode: bool) -> Option<Action> {
        match resolve_action(&self.service, edit_mode) {
            TileAction::Navigate { url, new_tab } => Some(Action::OpenUrl { url, new_tab }),
            TileAction::Inert => None,
        }
    }

    pub fn preferred_height(&self) -> u16 {
        4
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, look: TileLook) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::tile_border(look))
            .title(Line::styled(
                format!(" {} ", self.service.name),
                theme::tile_title(look),
            ));

        let target = match &self.service.url {
            Some(url) => Span::styled(url.as_str(), theme::link_text()),
            None => Span::styled("no URL configured", theme::muted_text()),
        };
        let behaviour = if look.inert || self.service.url.is_none() {
            Span::styled("inert", theme::muted_text())
        } else if self.service.behaviour.is_opening_new_tab {
            Span::styled("↗ opens in new tab", theme::key_hint())
        } else {
            Span::styled("→ opens in place", theme::key_hint())
        };

        let paragraph = Paragraph::new(vec![Line::from(target), Line::from(behaviour)]).block(block);
        frame.render_widget(paragraph, area);
    }
}
