// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    widgets::header::render_header(frame, app, layout.header);
    widgets::results_view::render_results_view(frame, app, layout.report);
    widgets::summary::render_summary(frame, app, layout.summary);
    widgets::footer::render_footer(frame, app, layout.footer);

    // The chat panel floats above everything else.
    if app.chat.is_open() {
        widgets::chat_panel::render_chat_panel(frame, app, layout.chat_panel);
    }
}
