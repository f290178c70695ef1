use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use profit_client::views::{SortColumn, SortDirection};

use crate::{
    app::{AppState, DetailFocus, ShipmentDetail},
    ui::{components::money, theme::Theme},
};

const COLUMNS: [SortColumn; 4] = [
    SortColumn::Id,
    SortColumn::Income,
    SortColumn::Cost,
    SortColumn::ProfitOrLoss,
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let Some(detail) = state.detail.as_ref() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_form(frame, layout[0], detail, state.focus, &theme);
    render_filter(frame, layout[1], state, &theme);
    render_table(frame, layout[2], detail, &theme);
    render_footer(frame, layout[3], detail, &theme);
}

fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    detail: &ShipmentDetail,
    focus: DetailFocus,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Shipment {} · new calculation ", detail.shipment_id));

    let lines = vec![
        field_line(
            "Income",
            &detail.income,
            &detail.field_errors.income,
            focus == DetailFocus::Income,
            theme,
        ),
        field_line(
            "Cost",
            &detail.cost,
            &detail.field_errors.cost,
            focus == DetailFocus::Cost,
            theme,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(
    label: &'a str,
    value: &'a str,
    errors: &[String],
    focused: bool,
    theme: &Theme,
) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let cursor = if focused { "▏" } else { "" };

    let mut spans = vec![
        Span::styled(format!("{label:<7}"), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.accent)),
    ];
    if !errors.is_empty() {
        spans.push(Span::styled(
            format!("  {}", errors.join("; ")),
            Style::default().fg(theme.error),
        ));
    }
    Line::from(spans)
}

fn render_filter(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == DetailFocus::Filter;
    let label_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };
    let line = Line::from(vec![
        Span::styled(" Filter: ", label_style),
        Span::raw(state.filter_input.clone()),
        Span::styled(if focused { "▏" } else { "" }, label_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, detail: &ShipmentDetail, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Calculations ");

    if let Some(message) = detail.no_data_message() {
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(theme.dim)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let sort = detail.sort();
    let header = Row::new(COLUMNS.iter().map(|column| {
        let arrow = match sort {
            Some(s) if s.column == *column => match s.direction {
                SortDirection::Asc => " ▲",
                SortDirection::Desc => " ▼",
            },
            _ => "",
        };
        Cell::from(format!("{}{arrow}", column.label()))
    }))
    .style(
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = detail
        .visible_rows()
        .into_iter()
        .map(|calc| {
            Row::new(vec![
                Cell::from(calc.id.to_string()),
                Cell::from(money::format_eur(calc.income)),
                Cell::from(money::format_eur(calc.cost)),
                Cell::from(money::styled_profit(calc.profit_or_loss, theme)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(Style::default().fg(theme.text))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default().with_selected(Some(detail.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, detail: &ShipmentDetail, theme: &Theme) {
    let line = Line::from(Span::styled(
        format!(
            " Page {}/{} · {} per page · {} rows",
            detail.page_index() + 1,
            detail.page_count(),
            detail.page_size(),
            detail.filtered().len(),
        ),
        Style::default().fg(theme.dim),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
