// src/core/results.rs

use std::path::Path;
use tracing::{debug, info};

use crate::core::error::PayloadError;
use crate::core::models::{AnalysisResult, CompactResult, FullResult};

/// The element analysis results are injected into.
///
/// Holds the markup that was last rendered, whether it is shown, and the
/// result it came from so that other views can project the same data.
#[derive(Debug, Clone, Default)]
pub struct ResultsContainer {
    visible: bool,
    html: String,
    current: Option<AnalysisResult>,
}

impl ResultsContainer {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Renders `data` into the results container and makes it visible.
///
/// A missing container is not an error: there is simply nowhere to render to.
pub fn display_results(container: Option<&mut ResultsContainer>, data: &AnalysisResult) {
    let Some(container) = container else {
        debug!("No results container present, skipping render.");
        return;
    };

    container.html = render_card(data);
    container.current = Some(data.clone());
    container.visible = true;
    info!(analysis_id = %data.analysis_id(), state = %data.state_class(), "Analysis results rendered.");
}

/// Produces the HTML result card for an analysis.
pub fn render_card(data: &AnalysisResult) -> String {
    match data {
        AnalysisResult::Compact(compact) => render_compact(compact, &data.state_class()),
        AnalysisResult::Full(full) => render_full(full, &data.state_class()),
    }
}

fn render_compact(result: &CompactResult, state: &str) -> String {
    format!(
        r#"
        <div class="result-card result-{state}">
            <h3>Quick Summary</h3>
            <pre style="white-space:pre-wrap; font-family:inherit;">{report}</pre>
            <p><a href="/analysis/{id}">View Detailed Analysis</a></p>
        </div>
    "#,
        state = html_escape(state),
        report = html_escape(&result.short_report),
        id = html_escape(&result.analysis_id.to_string()),
    )
}

fn render_full(result: &FullResult, state: &str) -> String {
    format!(
        r#"
        <div class="result-card result-{state}">
            <h3>Analysis Results</h3>
            <p><strong>Classification:</strong> {classification}</p>
            <p><strong>Confidence:</strong> {confidence}%</p>
            <p><strong>Processing Time:</strong> {processing_ms}ms</p>
            <p><strong>Word Count:</strong> {word_count}</p>
            <p><a href="/analysis/{id}">View Detailed Analysis</a></p>
        </div>
    "#,
        state = html_escape(state),
        classification = html_escape(&result.classification),
        confidence = result.confidence,
        processing_ms = result.processing_ms,
        word_count = result.word_count,
        id = html_escape(&result.analysis_id.to_string()),
    )
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reads and validates an analysis payload from a JSON file.
pub async fn load_analysis_file(path: &Path) -> Result<AnalysisResult, PayloadError> {
    info!(path = %path.display(), "Loading analysis payload.");
    let json = tokio::fs::read_to_string(path).await?;
    AnalysisResult::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AnalysisId;
    use scraper::{Html, Selector};
    use std::io::Write;

    fn full() -> AnalysisResult {
        AnalysisResult::Full(FullResult {
            analysis_id: AnalysisId::from(12),
            classification: "FAKE".into(),
            confidence: 87.5,
            processing_ms: 240.0,
            word_count: 512.0,
            created_at: None,
        })
    }

    fn compact(report: &str, classification: Option<&str>) -> AnalysisResult {
        AnalysisResult::Compact(CompactResult {
            analysis_id: AnalysisId::Text("abc".into()),
            short_report: report.into(),
            classification: classification.map(String::from),
            created_at: None,
        })
    }

    fn select_texts(html: &str, selector: &str) -> Vec<String> {
        let doc = Html::parse_fragment(html);
        let selector = Selector::parse(selector).unwrap();
        doc.select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    #[test]
    fn missing_container_is_a_no_op() {
        display_results(None, &full());
    }

    #[test]
    fn full_card_lists_the_four_metrics_and_link() {
        let mut container = ResultsContainer::default();
        display_results(Some(&mut container), &full());

        assert!(container.is_visible());
        let html = container.html();
        let doc = Html::parse_fragment(html);
        let card = Selector::parse("div.result-card.result-fake").unwrap();
        assert_eq!(doc.select(&card).count(), 1);

        let rows = select_texts(html, "p");
        assert_eq!(rows[0], "Classification: FAKE");
        assert_eq!(rows[1], "Confidence: 87.5%");
        assert_eq!(rows[2], "Processing Time: 240ms");
        assert_eq!(rows[3], "Word Count: 512");

        let link = Selector::parse("a").unwrap();
        let href = doc.select(&link).next().unwrap().value().attr("href");
        assert_eq!(href, Some("/analysis/12"));
        assert!(select_texts(html, "pre").is_empty());
    }

    #[test]
    fn compact_card_never_renders_metrics() {
        let mut container = ResultsContainer::default();
        display_results(Some(&mut container), &compact("Mostly accurate.", Some("Real")));

        let html = container.html();
        assert!(html.contains(r#"class="result-card result-real""#));
        assert_eq!(select_texts(html, "h3"), vec!["Quick Summary"]);
        assert_eq!(select_texts(html, "pre"), vec!["Mostly accurate."]);
        assert!(!html.contains("Confidence"));
        assert!(html.contains(r#"href="/analysis/abc""#));
    }

    #[test]
    fn compact_without_classification_uses_summary_state() {
        let html = render_card(&compact("x", None));
        assert!(html.contains("result-summary"));
    }

    #[test]
    fn short_report_is_rendered_as_literal_text() {
        let html = render_card(&compact("<script>alert(1)</script> & more", None));

        assert!(!html.contains("<script>"));
        assert_eq!(
            select_texts(&html, "pre"),
            vec!["<script>alert(1)</script> & more"]
        );
    }

    #[test]
    fn rerender_replaces_previous_card() {
        let mut container = ResultsContainer::default();
        display_results(Some(&mut container), &full());
        display_results(Some(&mut container), &compact("second", None));

        assert_eq!(select_texts(container.html(), "h3"), vec!["Quick Summary"]);
        assert!(matches!(container.current(), Some(AnalysisResult::Compact(_))));
    }

    #[tokio::test]
    async fn loads_payload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"analysis_id": 5, "classification": "Real", "confidence": 70,
                "processing_ms": 15, "word_count": 99, "extra": true}}"#
        )
        .unwrap();

        let result = load_analysis_file(file.path()).await.unwrap();
        assert_eq!(result.detail_path(), "/analysis/5");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_analysis_file(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, PayloadError::Io(_)));
    }
}
