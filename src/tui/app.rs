//! Application state for the TUI.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tracing::info;

use super::{
    navigator::Navigator,
    ui,
    widgets::{InteractiveStatefulWidget, KeyMouseEvent, PillBar, PillBarState},
};
use crate::{
    config::{Config, TabConfig},
    selector::SelectorBar,
};

/// Longest frame the indicator is advanced by at once.
const MAX_FRAME: Duration = Duration::from_millis(100);

/// Application state.
pub struct App {
    config: Config,
    /// Tabs in their current order.
    tabs: Vec<TabConfig>,
    /// Tabs taken out with `d`, restored with `u`.
    removed: Vec<TabConfig>,
    pub navigator: Navigator,
    pub pill: PillBarState,
    /// Whether app should exit.
    pub should_exit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut pill = PillBarState::new(SelectorBar::new(config.spring));
        PillBar::update_state(&mut pill, config.options());
        let mut navigator = Navigator::from_config(&config);
        navigator.route(&mut pill.bar);

        Self {
            tabs: config.tabs.clone(),
            config,
            removed: Vec::new(),
            navigator,
            pill,
            should_exit: false,
        }
    }

    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        self.config.frame_interval()
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabConfig] {
        &self.tabs
    }

    #[must_use]
    pub fn tab(&self, id: &str) -> Option<&TabConfig> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Advance the frame clock.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.min(MAX_FRAME);
        if self.navigator.advance(dt) {
            self.navigator.route(&mut self.pill.bar);
        }
        self.pill.bar.tick(dt);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        ui::render(frame, self);
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) if self.navigator.modal().is_none() => {
                PillBar::handle_event(&mut self.pill, KeyMouseEvent::Mouse(*mouse));
            }
            _ => return,
        }
        self.navigator.route(&mut self.pill.bar);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        if self.navigator.modal().is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.navigator.close_modal();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('d') => self.remove_active_tab(),
            KeyCode::Char('u') => self.restore_tabs(),
            KeyCode::Char('r') => self.rotate_tabs(),
            _ => {
                PillBar::handle_event(&mut self.pill, KeyMouseEvent::Key(key));
            }
        }
    }

    fn remove_active_tab(&mut self) {
        let Some(active) = self.navigator.active() else {
            return;
        };
        if self.tabs.len() <= 1 {
            return;
        }
        let Some(pos) = self.tabs.iter().position(|t| t.id == active) else {
            return;
        };
        let tab = self.tabs.remove(pos);
        info!(tab = %tab.id, "tab removed");
        self.removed.push(tab);
        self.apply_tabs();
    }

    fn restore_tabs(&mut self) {
        if self.removed.is_empty() {
            return;
        }
        self.tabs.append(&mut self.removed);
        self.apply_tabs();
    }

    fn rotate_tabs(&mut self) {
        if !self.tabs.is_empty() {
            self.tabs.rotate_left(1);
            self.apply_tabs();
        }
    }

    fn apply_tabs(&mut self) {
        let options = self.tabs.iter().map(TabConfig::to_option).collect();
        PillBar::update_state(&mut self.pill, options);
        self.navigator.retain_tabs(&self.tabs);
        self.navigator.route(&mut self.pill.bar);
    }
}
