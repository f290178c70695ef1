use ratatui::{style::Style, text::Span};

use profit_client::Route;

use crate::{app::DetailFocus, ui::theme::Theme};

/// A key and what it does on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

const fn hint(key: &'static str, action: &'static str) -> KeyHint {
    KeyHint { key, action }
}

const SHIPMENTS: &[KeyHint] = &[
    hint("↑↓", "select"),
    hint("Enter", "open"),
    hint("a", "add"),
    hint("d", "delete"),
    hint("r", "refresh"),
    hint("q", "quit"),
];

const DETAIL_TABLE: &[KeyHint] = &[
    hint("b", "back"),
    hint("a", "add"),
    hint("/", "filter"),
    hint("1-4", "sort"),
    hint("n/p", "page"),
    hint("z", "page size"),
    hint("d", "delete"),
    hint("r", "refresh"),
];

const DETAIL_FORM: &[KeyHint] = &[
    hint("Tab", "next"),
    hint("Enter", "add"),
    hint("Esc", "table"),
];

const DETAIL_FILTER: &[KeyHint] = &[hint("Enter", "apply"), hint("Esc", "table")];

/// Hints for the screen behind `route`; the detail screen depends on focus.
pub fn for_screen(route: Route, focus: DetailFocus) -> Vec<KeyHint> {
    let hints = match (route, focus) {
        (Route::Shipments, _) => SHIPMENTS,
        (Route::ShipmentDetail(_), DetailFocus::Table) => DETAIL_TABLE,
        (Route::ShipmentDetail(_), DetailFocus::Income | DetailFocus::Cost) => DETAIL_FORM,
        (Route::ShipmentDetail(_), DetailFocus::Filter) => DETAIL_FILTER,
    };
    hints.to_vec()
}

/// Keys that work everywhere.
pub fn global() -> Vec<KeyHint> {
    vec![hint("x", "clear notifications"), hint("Ctrl+C", "quit")]
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }
    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}
