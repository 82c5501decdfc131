//! Palette, semantic styles, and the tile state → style mapping.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn body_text() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Placeholder messages ("no information", "no service").
pub fn muted_text() -> Style {
    Style::default().fg(BORDER_GRAY).add_modifier(Modifier::ITALIC)
}

pub fn link_text() -> Style {
    Style::default()
        .fg(LIGHT_BLUE)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn value_text() -> Style {
    Style::default().fg(CYAN)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn mode_badge(edit: bool) -> Style {
    let bg = if edit { YELLOW } else { GREEN };
    Style::default()
        .fg(BG_DARK)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

// ── Tile styling ──────────────────────────────────────────────────────

/// Conditions that modify how a tile frame looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileLook {
    pub selected: bool,
    /// Tile does not react to activation (edit mode).
    pub inert: bool,
    /// Last status fetch failed.
    pub failed: bool,
}

/// Border style for a tile: base style, then each active condition's
/// modifier layered in a fixed order.
pub fn tile_border(look: TileLook) -> Style {
    const MODIFIERS: [(fn(TileLook) -> bool, fn(Style) -> Style); 3] = [
        (|l| l.selected, |s| s.fg(ACCENT).add_modifier(Modifier::BOLD)),
        (|l| l.failed, |s| s.fg(RED)),
        (|l| l.inert, |s| s.add_modifier(Modifier::DIM)),
    ];

    MODIFIERS
        .iter()
        .filter(|(applies, _)| applies(look))
        .fold(border_default(), |style, (_, apply)| apply(style))
}

/// Title style for a tile, following the same conditions.
pub fn tile_title(look: TileLook) -> Style {
    let base = title_style();
    if look.inert {
        base.add_modifier(Modifier::DIM)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tile_uses_default_border() {
        assert_eq!(tile_border(TileLook::default()), border_default());
    }

    #[test]
    fn failure_colour_wins_over_selection() {
        let style = tile_border(TileLook {
            selected: true,
            failed: true,
            inert: false,
        });
        assert_eq!(style.fg, Some(RED));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inert_tiles_are_dimmed() {
        let style = tile_border(TileLook {
            inert: true,
            ..TileLook::default()
        });
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert!(tile_title(TileLook {
            inert: true,
            ..TileLook::default()
        })
        .add_modifier
        .contains(Modifier::DIM));
    }
}
