use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let view = &state.shipments;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Shipments ({}) ", view.shipments.len()));

    if view.shipments.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No shipments yet. Press a to add one.",
            Style::default().fg(theme.dim),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .shipments
        .iter()
        .map(|shipment| ListItem::new(format!("Shipment ID: {}", shipment.id)))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(theme.text))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut list_state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
