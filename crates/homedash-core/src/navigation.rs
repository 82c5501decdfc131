// ── Service tile navigation ──

use url::Url;

use crate::model::Service;

/// What activating a service tile does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileAction {
    /// Renders but does not navigate.
    Inert,
    Navigate { url: Url, new_tab: bool },
}

impl TileAction {
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Inert)
    }
}

/// Resolve the navigation for `service`.
///
/// Inert when the service has no URL or the dashboard is being edited;
/// otherwise navigate, in a new tab iff the service asks for it.
pub fn resolve_action(service: &Service, edit_mode: bool) -> TileAction {
    match &service.url {
        Some(url) if !edit_mode => TileAction::Navigate {
            url: url.clone(),
            new_tab: service.behaviour.is_opening_new_tab,
        },
        _ => TileAction::Inert,
    }
}
