use api_types::calculation::Outcome;
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats an amount as euros with thousands separators, e.g. `-€1,234.50`.
pub fn format_eur(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}€{grouped}.{frac_part}")
}

/// Profit/loss cell: green for profit, red for loss, neutral at break-even.
pub fn styled_profit(amount: f64, theme: &Theme) -> Span<'static> {
    let color = match Outcome::of(amount) {
        Outcome::Profit => theme.positive,
        Outcome::Loss => theme.negative,
        Outcome::BreakEven => theme.text,
    };
    Span::styled(format_eur(amount), Style::default().fg(color))
}
