//! Widgets for the tab bar UI.

pub mod interactive_widget;
pub mod pill_bar;
pub mod theme;

pub use crossterm::event::KeyEvent;
use crossterm::event::MouseEvent;
pub use interactive_widget::InteractiveStatefulWidget;
pub use pill_bar::{column_geometries, PillBar, PillBarState};
use ratatui::layout::Rect;

#[derive(Clone)]
pub enum KeyMouseEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// A clickable region mapped to an option position.
#[derive(Debug, Clone)]
pub struct ClickRegion {
    pub area: Rect,
    pub index: usize,
}
