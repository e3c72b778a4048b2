//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::{
    app::App,
    widgets::{theme::Theme, PillBar},
};
use crate::selector::IndicatorState;

/// Render the UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [panel_area, bar_area, help_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_panel(frame, app, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(Theme::BORDER))
        .style(Style::new().bg(Theme::BAR));
    frame.render_stateful_widget(PillBar::default().block(block), bar_area, &mut app.pill);

    render_help(frame, help_area);

    if let Some(id) = app.navigator.modal() {
        let label = app.tab(id).map_or(id, |t| t.label());
        let area = frame.area();
        render_modal(frame, label, area);
    }
}

/// Render the panel of the active tab.
fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bar = &app.pill.bar;
    let title = app
        .navigator
        .active()
        .and_then(|id| app.tab(id))
        .map_or_else(|| " … ".to_owned(), |t| format!(" {} ", t.label()));

    let block = Block::default()
        .title(title)
        .title_style(Theme::TITLE)
        .borders(Borders::ALL)
        .border_style(Style::new().fg(Theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = match bar.state() {
        IndicatorState::Uninitialized => "uninitialized",
        IndicatorState::Settled => "settled",
        IndicatorState::Transitioning => "transitioning",
    };
    let indicator = bar.indicator().map_or_else(
        || "hidden".to_owned(),
        |g| format!("offset {:.2}, width {:.2}", g.offset, g.width),
    );

    let lines = vec![
        Line::from(vec![
            Span::styled("Indicator: ", Theme::DIM),
            Span::raw(state),
        ]),
        Line::from(vec![
            Span::styled("Position:  ", Theme::DIM),
            Span::raw(indicator),
        ]),
        Line::from(vec![
            Span::styled("Tracking:  ", Theme::DIM),
            Span::raw(bar.tracked().unwrap_or("-").to_owned()),
        ]),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Render the modal opened by an overriding tab.
fn render_modal(frame: &mut Frame, label: &str, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .title(format!(" {label} "))
        .title_style(Theme::TITLE)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(Theme::MODAL_BORDER));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Esc", Theme::KEY),
            Span::raw(": close"),
        ]))
        .alignment(Alignment::Center)
        .block(block),
        popup,
    );
}

/// Render the help bar at the bottom.
fn render_help(frame: &mut Frame, area: Rect) {
    const KEYBINDINGS: &[(&str, &str)] = &[
        ("←/→", "move"),
        ("1-9", "select"),
        ("d", "drop tab"),
        ("u", "restore"),
        ("r", "rotate"),
        ("q", "quit"),
    ];

    let separator = Span::raw(" │ ");
    let spans: Vec<Span> = KEYBINDINGS
        .iter()
        .enumerate()
        .flat_map(|(i, (key, desc))| {
            let prefix = (i > 0).then(|| separator.clone());
            prefix.into_iter().chain([
                Span::styled(*key, Theme::KEY),
                Span::raw(format!(": {desc}")),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
