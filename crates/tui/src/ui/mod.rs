pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use profit_client::{Notifier, Route};

use crate::app::AppState;
use components::hints::{self, hint_separator, hints_to_spans};
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    match state.route {
        Route::Shipments => screens::shipments::render(frame, layout[1], state),
        Route::ShipmentDetail(_) => screens::shipment_detail::render(frame, layout[1], state),
    }
    render_bottom_bar(frame, layout[2], state, &theme);
    components::notifications::render(frame, area, &state.notifier.notifications());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refreshed = match (&state.route, &state.detail) {
        (Route::ShipmentDetail(_), Some(detail)) => detail.last_refresh,
        _ => state.shipments.last_refresh,
    };
    let refresh = refreshed
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = vec![
        Span::styled("Backend", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Route", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.route.path())),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}")),
    ];

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints_to_spans(&hints::for_screen(state.route, state.focus), theme);
    parts.push(hint_separator(theme));
    parts.extend(hints_to_spans(&hints::global(), theme));
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
