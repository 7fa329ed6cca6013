// src/ui/widgets/mod.rs

use ratatui::style::Color;

pub mod chat_panel;
pub mod footer;
pub mod header;
pub mod input;
pub mod results_view;
pub mod summary;

/// Colour used for a result card, keyed by its lowercased classification.
pub fn classification_color(state: &str) -> Color {
    match state {
        s if s.contains("fake") || s.contains("false") => Color::Red,
        s if s.contains("real") || s.contains("true") || s.contains("reliable") => Color::Green,
        "summary" => Color::Cyan,
        _ => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifications_map_to_traffic_lights() {
        assert_eq!(classification_color("fake"), Color::Red);
        assert_eq!(classification_color("likely_real"), Color::Green);
        assert_eq!(classification_color("summary"), Color::Cyan);
        assert_eq!(classification_color("unknown"), Color::Yellow);
    }
}
