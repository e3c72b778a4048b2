//! Centralized theme and styling constants.

use ratatui::style::{Color, Modifier, Style};

/// Theme constants for consistent styling across components.
pub struct Theme;

impl Theme {
    // Bar surface and indicator
    pub const BAR: Color = Color::Rgb(0x1b, 0x1d, 0x1f);
    pub const PILL: Color = Color::Rgb(0x2c, 0x2f, 0x33);
    pub const BORDER: Color = Color::Rgb(0x2c, 0x2f, 0x33);

    // Option labels
    pub const ACTIVE: Style = Style::new()
        .fg(Color::Rgb(0xf6, 0xf7, 0xfb))
        .add_modifier(Modifier::BOLD);
    pub const INACTIVE: Style = Style::new().fg(Color::Rgb(0x8f, 0x93, 0x9b));

    // Panels
    pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    pub const DIM: Style = Style::new().fg(Color::DarkGray);
    pub const KEY: Style = Style::new().fg(Color::Cyan);
    pub const MODAL_BORDER: Color = Color::Yellow;

    /// Label style for an option row.
    #[must_use]
    pub const fn label(is_active: bool) -> Style {
        if is_active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        }
    }
}
