// src/ui/widgets/footer.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = if app.chat.is_open() {
        vec![
            key("Enter"),
            Span::raw(" send, "),
            key("Esc"),
            Span::raw(" close chat, "),
            key("F2"),
            Span::raw(" hide/show input, "),
            key("PgUp/PgDn"),
            Span::raw(" scroll"),
        ]
    } else {
        vec![
            key("[C]"),
            Span::raw("hat, "),
            key("[R]"),
            Span::raw("eload, "),
            key("[Y]"),
            Span::raw(" copy link, "),
            key("[E]"),
            Span::raw("xport, "),
            key("[Q]"),
            Span::raw("uit"),
        ]
    };

    if let Some(notice) = &app.notice {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(notice.as_str(), Style::default().fg(Color::Cyan)));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
