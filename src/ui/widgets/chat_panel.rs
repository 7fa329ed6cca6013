// src/ui/widgets/chat_panel.rs

use crate::app::App;
use crate::core::chat::{ChatMessage, ChatWidget};
use crate::core::models::Role;
use crate::ui::widgets::input::render_input;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Renders the floating chat panel on top of the existing UI.
///
/// `Clear` wipes the area first so the results underneath do not bleed
/// through. The log is kept pinned to its newest line unless the user has
/// scrolled back.
pub fn render_chat_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("TruthGuard Assistant (Esc to close)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [log_area, input_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

    let glyph = app.spinner_glyph();
    let lines = log_lines(&app.chat, log_area.width as usize, glyph);
    let top = first_visible_line(lines.len(), log_area.height as usize, app.chat.scroll_back() as usize);
    let log = Paragraph::new(lines).scroll((top as u16, 0));
    frame.render_widget(log, log_area);

    render_input(frame, app.chat.input(), input_area, true);
}

/// Index of the first line to show so that the newest lines fill the bottom of
/// the view, shifted up by `scroll_back` lines.
fn first_visible_line(total: usize, height: usize, scroll_back: usize) -> usize {
    let max_top = total.saturating_sub(height);
    max_top.saturating_sub(scroll_back)
}

fn log_lines(chat: &ChatWidget, width: usize, glyph: char) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in chat.messages() {
        let (prefix, style) = match message.role {
            Role::User => ("You", Style::default().fg(Color::Yellow).bold()),
            Role::Bot => ("Bot", Style::default().fg(Color::Cyan).bold()),
        };
        let text = message_text(chat, message, glyph);
        let indent = prefix.len() + 2;
        let wrapped = wrap(&text, width.saturating_sub(indent).max(1));

        for (i, chunk) in wrapped.into_iter().enumerate() {
            let lead = if i == 0 {
                Span::styled(format!("{}: ", prefix), style)
            } else {
                Span::raw(" ".repeat(indent))
            };
            lines.push(Line::from(vec![lead, Span::raw(chunk)]));
        }
    }
    lines
}

fn message_text(chat: &ChatWidget, message: &ChatMessage, glyph: char) -> String {
    match message.request {
        Some(id) if chat.is_in_flight(id) => format!("{} {}", glyph, message.text),
        _ => message.text.clone(),
    }
}

/// Hard-wraps `text` into chunks of at most `width` characters, keeping explicit line breaks.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(chars.chunks(width).map(|c| c.iter().collect::<String>()));
    }
    out
}
