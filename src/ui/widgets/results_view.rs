// src/ui/widgets/results_view.rs

use crate::app::App;
use crate::core::models::AnalysisResult;
use crate::ui::widgets::classification_color;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders the result card for the analysis currently in the results container.
///
/// The card mirrors the HTML rendering: a "Quick Summary" with the short
/// report when there is one, otherwise the four analysis metrics. The border
/// takes the colour of the card's classification.
pub fn render_results_view(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis (Navigate with ↑ ↓)");

    if app.loading.is_visible() {
        let content = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", app.loading.glyph()), Style::default().fg(Color::Cyan)),
            Span::raw("Loading analysis... Please wait."),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(content.block(block), area);
        return;
    }

    let current = app.results.current().filter(|_| app.results.is_visible());
    let Some(result) = current else {
        let text = match (&app.load_error, &app.result_source) {
            (Some(e), _) => Text::from(vec![
                Line::from("Could not load analysis".bold().fg(Color::Red)),
                Line::from(""),
                Line::from(e.as_str()),
            ]),
            (None, Some(path)) => Text::from(format!("No analysis loaded from {}.", path.display())),
            (None, None) => Text::from(
                "No analysis loaded. Start with --result <FILE> to show one.\nPress 'c' to chat with the assistant.",
            ),
        };
        let content = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(content.block(block), area);
        return;
    };

    let state = result.state_class();
    let block = block.border_style(Style::default().fg(classification_color(&state)));
    let card = Paragraph::new(card_lines(result))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));
    frame.render_widget(card, area);
}

fn card_lines(result: &AnalysisResult) -> Vec<Line<'_>> {
    let label = |s: &'static str| Span::styled(s, Style::default().bold());
    let mut lines = Vec::new();

    match result {
        AnalysisResult::Compact(compact) => {
            lines.push(Line::from("Quick Summary".bold().underlined()));
            lines.push(Line::from(""));
            lines.extend(compact.short_report.lines().map(Line::from));
        }
        AnalysisResult::Full(full) => {
            lines.push(Line::from("Analysis Results".bold().underlined()));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                label("Classification: "),
                Span::styled(
                    full.classification.as_str(),
                    Style::default().fg(classification_color(&result.state_class())),
                ),
            ]));
            lines.push(Line::from(vec![label("Confidence: "), Span::raw(format!("{}%", full.confidence))]));
            lines.push(Line::from(vec![label("Processing Time: "), Span::raw(format!("{}ms", full.processing_ms))]));
            lines.push(Line::from(vec![label("Word Count: "), Span::raw(full.word_count.to_string())]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("View Detailed Analysis: "),
        Span::styled(result.detail_path(), Style::default().fg(Color::Cyan).underlined()),
    ]));
    lines
}
