// src/ui/widgets/header.rs

use crate::app::App;
use ratatui::{prelude::*, widgets::Paragraph};

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" TruthGuard ", Style::new().bold().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(app.base_url.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
