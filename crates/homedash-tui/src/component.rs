//! Component trait: the building block for every UI element.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Every view implements Component.
///
/// Lifecycle: construct (mount) → (`handle_key_event` | `update` | `render`)* → drop (unmount).
/// Views start their background work when constructed and stop it when
/// dropped, so there is no separate `init`.
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Whether the component is taking free text, so global keys must not
    /// be intercepted.
    fn captures_input(&self) -> bool {
        false
    }

    /// Key hints shown in the status bar while this component is active.
    fn key_hints(&self) -> &'static str {
        ""
    }

    /// Identifier for logs.
    fn id(&self) -> &str;
}
