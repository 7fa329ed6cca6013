// src/ui/widgets/summary.rs

use crate::app::{App, ExportStatus};
use crate::core::controls::format_date;
use crate::core::models::AnalysisResult;
use crate::ui::widgets::classification_color;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

/// Renders the summary widget: verdict, confidence gauge and bookkeeping.
///
/// # Arguments
/// * `frame` - The `Frame` used for rendering the UI.
/// * `app` - A reference to the application's state.
/// * `area` - The `Rect` defining the drawable area for this widget.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Verdict
            Constraint::Length(1), // Confidence gauge
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Details
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Chat + export status
        ])
        .split(area);

    render_status(frame, app, summary_chunks[5]);

    let Some(result) = app.results.current().filter(|_| app.results.is_visible()) else {
        return;
    };

    // --- Verdict ---
    let state = result.state_class();
    let verdict = result
        .classification()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "SUMMARY".to_string());
    let verdict_text = Text::from(vec![
        Line::from("Verdict".bold()),
        Line::from(verdict).style(Style::default().fg(classification_color(&state)).bold()),
    ]);
    frame.render_widget(Paragraph::new(verdict_text).alignment(Alignment::Center), summary_chunks[0]);

    // --- Confidence Gauge ---
    if let AnalysisResult::Full(full) = result {
        let percent = full.confidence.clamp(0.0, 100.0).round() as u16;
        let gauge = Gauge::default()
            .percent(percent)
            .label(format!("{}% confidence", full.confidence))
            .gauge_style(Style::default().fg(classification_color(&state)));
        frame.render_widget(gauge, summary_chunks[1]);
    }

    // --- Details ---
    let analyzed = match result.created_at() {
        Some(raw) => format_date(raw).unwrap_or_else(|_| raw.to_string()),
        None => "unknown".to_string(),
    };
    let details = Text::from(vec![
        Line::from(vec![Span::raw("Analysis: "), Span::styled(result.analysis_id().to_string(), Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw("Analyzed: "), Span::raw(analyzed)]),
        Line::from(vec![Span::raw("Card: "), Span::styled(format!("result-{}", state), Style::default().fg(Color::DarkGray))]),
    ]);
    frame.render_widget(Paragraph::new(details), summary_chunks[3]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::raw("Chat: "),
        Span::styled(
            match app.chat.in_flight_count() {
                0 => "idle".to_string(),
                n => format!("{} waiting", n),
            },
            Style::default().fg(Color::Cyan),
        ),
    ])];

    match &app.export_status {
        ExportStatus::Idle => {}
        ExportStatus::Success(path) => lines.push(Line::from(vec![
            Span::styled("Exported: ", Style::default().fg(Color::Green)),
            Span::raw(path.as_str()),
        ])),
        ExportStatus::Error(e) => lines.push(Line::from(Span::styled(
            format!("Export failed: {}", e),
            Style::default().fg(Color::Red),
        ))),
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
