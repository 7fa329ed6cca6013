// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::core::controls::InputField;

/// Renders a text input box, placing the terminal cursor at its end when focused.
pub fn render_input(frame: &mut Frame, field: &InputField, area: Rect, focused: bool) {
    let title = if field.is_masked() { "Message (hidden, F2 to show)" } else { "Message" };
    let input_block = Block::default().borders(Borders::ALL).title(title);
    let input_paragraph = Paragraph::new(field.display())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    if focused {
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(field.cursor() as u16).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}
