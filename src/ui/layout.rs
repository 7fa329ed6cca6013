// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Defines the areas of the application's user interface.
pub struct AppLayout {
    pub header: Rect,
    pub report: Rect,
    pub summary: Rect,
    pub footer: Rect,
    /// Overlay area of the floating chat panel, anchored bottom-right.
    pub chat_panel: Rect,
}

/// Creates the complete application layout.
///
/// Three vertical chunks: a one-line header, the main content and a footer.
/// The content is split horizontally into the result card and the summary.
/// The chat panel does not take space from them; it is drawn over the
/// bottom-right corner of the content.
///
/// # Arguments
/// * `frame_size` - The `Rect` representing the total size of the terminal frame.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[1]);

    AppLayout {
        header: main_chunks[0],
        report: content_chunks[0],
        summary: content_chunks[1],
        footer: main_chunks[2],
        chat_panel: docked_rect(50, 70, main_chunks[1]),
    }
}

/// A rectangle of the given percentage size, pinned to the bottom-right of `r`.
fn docked_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::End)
        .areas(r);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::End)
        .areas(row);
    area
}
