//! Bottom tab bar with the animated pill.
//!
//! Draw order within one frame: surface, pill at its current animated
//! footprint, labels, then the layout report. Geometry therefore always
//! lands after the paint that produced it, and the very first frame shows
//! no pill.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

use super::{theme::Theme, ClickRegion, InteractiveStatefulWidget, KeyMouseEvent};
use crate::selector::{Geometry, SelectorBar, SelectorOption};

/// State of the bar between frames.
#[derive(Debug, Default)]
pub struct PillBarState {
    pub bar: SelectorBar,
    click_regions: Vec<ClickRegion>,
}

impl PillBarState {
    #[must_use]
    pub const fn new(bar: SelectorBar) -> Self {
        Self {
            bar,
            click_regions: Vec::new(),
        }
    }

    #[must_use]
    pub fn click_regions(&self) -> &[ClickRegion] {
        &self.click_regions
    }

    fn option_at(&self, x: u16, y: u16) -> Option<usize> {
        self.click_regions
            .iter()
            .find(|r| r.area.contains(Position { x, y }))
            .map(|r| r.index)
    }

    /// Position the indicator currently aims at, or failing that the active one.
    fn current_index(&self) -> Option<usize> {
        self.bar
            .tracked()
            .or_else(|| self.bar.active())
            .and_then(|id| self.bar.index_of(id))
    }

    /// Activate the nearest regular option before or after the current one.
    fn step(&mut self, forward: bool) -> bool {
        let overrides: Vec<bool> = self
            .bar
            .options()
            .map(|o| o.overrides_selection)
            .collect();
        let order: Vec<usize> = match (self.current_index(), forward) {
            (Some(i), true) => (i + 1..overrides.len()).collect(),
            (Some(i), false) => (0..i).rev().collect(),
            (None, _) => (0..overrides.len()).collect(),
        };
        order
            .into_iter()
            .find(|&i| !overrides[i])
            .is_some_and(|i| self.bar.activate(i))
    }
}

/// Equal-width columns for `count` options across `area`.
fn columns(area: Rect, count: usize) -> Rc<[Rect]> {
    Layout::horizontal(vec![Constraint::Fill(1); count]).split(area)
}

/// Geometry of `count` equal columns across a bar `width` cells wide.
#[must_use]
pub fn column_geometries(width: u16, count: usize) -> Vec<Geometry> {
    let area = Rect::new(0, 0, width, 1);
    columns(area, count)
        .iter()
        .map(|col| Geometry::new(f64::from(col.x), f64::from(col.width)))
        .collect()
}

/// Renders a [`SelectorBar`] as a row of equal columns.
#[derive(Default)]
pub struct PillBar<'a> {
    block: Option<Block<'a>>,
}

impl<'a> PillBar<'a> {
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

#[allow(clippy::cast_sign_loss)]
fn paint_pill(pill: Geometry, area: Rect, buf: &mut Buffer) {
    let start = pill.offset.round().max(0.0) as u16;
    let end = (pill.offset + pill.width).round().max(0.0) as u16;
    for y in area.top()..area.bottom() {
        for x in start.min(area.width)..end.min(area.width) {
            if let Some(cell) = buf.cell_mut((area.x + x, y)) {
                cell.set_bg(Theme::PILL);
            }
        }
    }
}

fn option_line(option: &SelectorOption, is_active: bool) -> Line<'static> {
    let style = Theme::label(is_active);
    let mut spans = Vec::with_capacity(3);
    if let Some(glyph) = &option.glyph {
        spans.push(Span::styled(glyph.clone(), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(option.label.clone(), style));
    Line::from(spans)
}

impl StatefulWidget for PillBar<'_> {
    type State = PillBarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        if let Some(pill) = state.bar.indicator() {
            paint_pill(pill, inner, buf);
        }

        let count = state.bar.rows().len();
        let cols = columns(inner, count);
        state.click_regions.clear();
        for (index, col) in cols.iter().enumerate() {
            let Some(option) = state.bar.rows().get(index).map(|r| r.option()) else {
                continue;
            };
            let line = option_line(option, state.bar.is_highlighted(index));
            let label_row = Rect {
                y: inner.y + inner.height / 2,
                height: inner.height.min(1),
                ..*col
            };
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(label_row, buf);
            state.click_regions.push(ClickRegion { area: *col, index });
        }

        for (index, col) in cols.iter().enumerate() {
            let geometry = Geometry::new(f64::from(col.x - inner.x), f64::from(col.width));
            state.bar.report_layout(index, geometry);
        }
        state.bar.sync_indicator();
    }
}

impl InteractiveStatefulWidget for PillBar<'_> {
    type Input = Vec<SelectorOption>;
    type Event = KeyMouseEvent;

    fn update_state(state: &mut Self::State, input: Self::Input) {
        state.bar.set_options(input);
    }

    fn handle_event(state: &mut Self::State, event: Self::Event) -> bool {
        match event {
            KeyMouseEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Left | KeyCode::Char('h') => state.step(false),
                KeyCode::Right | KeyCode::Char('l') => state.step(true),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    state.bar.activate(index)
                }
                _ => false,
            },
            KeyMouseEvent::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
            {
                state
                    .option_at(mouse.column, mouse.row)
                    .is_some_and(|index| state.bar.activate(index))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn state(ids: &[&str], active: &str) -> PillBarState {
        let mut bar = SelectorBar::default();
        bar.set_options(ids.iter().map(|id| SelectorOption::new(*id)));
        bar.set_active(Some(active));
        PillBarState::new(bar)
    }

    fn draw(terminal: &mut Terminal<TestBackend>, state: &mut PillBarState) {
        terminal
            .draw(|frame| frame.render_stateful_widget(PillBar::default(), frame.area(), state))
            .unwrap();
    }

    fn key(code: KeyCode) -> KeyMouseEvent {
        KeyMouseEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_column_geometries_split_evenly() {
        assert_eq!(
            column_geometries(30, 3),
            vec![
                Geometry::new(0.0, 10.0),
                Geometry::new(10.0, 10.0),
                Geometry::new(20.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_first_frame_has_no_pill_second_frame_does() {
        let mut terminal = Terminal::new(TestBackend::new(30, 1)).unwrap();
        let mut state = state(&["a", "b", "c"], "b");

        draw(&mut terminal, &mut state);
        let buffer = terminal.backend().buffer().clone();
        assert!((0..30u16).all(|x| buffer[(x, 0u16)].bg != Theme::PILL));
        assert_eq!(state.bar.indicator(), Some(Geometry::new(10.0, 10.0)));

        draw(&mut terminal, &mut state);
        let buffer = terminal.backend().buffer();
        assert!((10..20u16).all(|x| buffer[(x, 0u16)].bg == Theme::PILL));
        assert!((0..10u16).all(|x| buffer[(x, 0u16)].bg != Theme::PILL));
    }

    #[test]
    fn test_resize_retargets_indicator() {
        let mut terminal = Terminal::new(TestBackend::new(30, 1)).unwrap();
        let mut state = state(&["a", "b", "c"], "c");
        draw(&mut terminal, &mut state);

        terminal.backend_mut().resize(60, 1);
        draw(&mut terminal, &mut state);

        assert_eq!(
            state.bar.motion().target(),
            Some(Geometry::new(40.0, 20.0))
        );
    }

    #[test]
    fn test_click_activates_option_under_pointer() {
        let mut terminal = Terminal::new(TestBackend::new(30, 1)).unwrap();
        let mut state = state(&["a", "b", "c"], "a");
        draw(&mut terminal, &mut state);

        let click = KeyMouseEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 25,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(PillBar::handle_event(&mut state, click));
        assert_eq!(state.bar.tracked(), Some("c"));
    }

    #[test]
    fn test_arrow_keys_skip_overriding_options() {
        let mut bar = SelectorBar::default();
        bar.set_options([
            SelectorOption::new("a"),
            SelectorOption::new("new").overriding(),
            SelectorOption::new("b"),
        ]);
        bar.set_active(Some("a"));
        let mut state = PillBarState::new(bar);

        assert!(PillBar::handle_event(&mut state, key(KeyCode::Right)));
        assert_eq!(state.bar.tracked(), Some("b"));
        assert!(state
            .bar
            .take_events()
            .iter()
            .all(|e| e.identifier() == "b"));
    }

    #[test]
    fn test_number_key_activates_by_position() {
        let mut state = state(&["a", "b"], "a");
        assert!(PillBar::handle_event(&mut state, key(KeyCode::Char('2'))));
        assert!(!PillBar::handle_event(&mut state, key(KeyCode::Char('9'))));
        assert_eq!(state.bar.tracked(), Some("b"));
    }
}
