use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use profit_client::{Notification, NotificationKind};

use crate::ui::theme::Theme;

const MAX_VISIBLE: usize = 4;

/// Stacks the newest notifications in the bottom-right corner, newest last.
pub fn render(frame: &mut Frame<'_>, area: Rect, notifications: &[Notification]) {
    let theme = Theme::default();
    let height = 3u16;
    let skip = notifications.len().saturating_sub(MAX_VISIBLE);
    let visible = &notifications[skip..];

    // Bottom bar stays visible below the stack.
    let mut bottom = area.y.saturating_add(area.height.saturating_sub(1));
    for notification in visible.iter().rev() {
        if bottom < area.y + height {
            break;
        }
        bottom -= height;

        let width = (notification.message.chars().count() + 4).min(area.width as usize) as u16;
        let x = area.x + area.width.saturating_sub(width);
        let rect = Rect {
            x,
            y: bottom,
            width,
            height,
        };

        let style = Style::default().fg(kind_color(notification.kind, &theme));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(notification.kind.as_str());
        let content = Paragraph::new(Line::from(notification.message.as_str())).style(style);
        frame.render_widget(Clear, rect);
        frame.render_widget(content.block(block), rect);
    }
}

fn kind_color(kind: NotificationKind, theme: &Theme) -> ratatui::style::Color {
    match kind {
        NotificationKind::Success => theme.positive,
        NotificationKind::Error => theme.error,
        NotificationKind::Warning => theme.warning,
        NotificationKind::Info => theme.text,
    }
}
