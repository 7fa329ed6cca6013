// src/core/models.rs

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use strum::Display;

use crate::core::error::PayloadError;

// --- Analysis Payload ---

/// Identifier of a stored analysis. The server hands out either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisId {
    Number(Number),
    Text(String),
}

impl From<i64> for AnalysisId {
    fn from(n: i64) -> Self {
        AnalysisId::Number(n.into())
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral floats print without a fraction: `3.0` shows as `3`.
            AnalysisId::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => write!(f, "{}", i),
                (None, Some(u), _) => write!(f, "{}", u),
                (None, None, Some(x)) => write!(f, "{}", x),
                (None, None, None) => write!(f, "{}", n),
            },
            AnalysisId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The `compact` block that accompanies a short report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompactBlock {
    #[serde(default)]
    pub classification: Option<String>,
}

/// The analysis payload exactly as it arrives on the wire.
///
/// Every field except `analysis_id` is optional here; which ones are actually
/// required depends on whether a short report is present, and that decision is
/// made once in `AnalysisResult::try_from`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub analysis_id: AnalysisId,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub processing_ms: Option<f64>,
    #[serde(default)]
    pub word_count: Option<f64>,
    #[serde(default)]
    pub short_report: Option<String>,
    #[serde(default)]
    pub compact: Option<CompactBlock>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A pre-formatted summary produced by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactResult {
    pub analysis_id: AnalysisId,
    pub short_report: String,
    pub classification: Option<String>,
    pub created_at: Option<String>,
}

/// The individual metrics of an analysis, shown when no short report exists.
#[derive(Debug, Clone, PartialEq)]
pub struct FullResult {
    pub analysis_id: AnalysisId,
    pub classification: String,
    pub confidence: f64,
    pub processing_ms: f64,
    pub word_count: f64,
    pub created_at: Option<String>,
}

/// A validated analysis result, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Compact(CompactResult),
    Full(FullResult),
}

impl TryFrom<AnalysisPayload> for AnalysisResult {
    type Error = PayloadError;

    fn try_from(payload: AnalysisPayload) -> Result<Self, Self::Error> {
        if let Some(short_report) = payload.short_report.filter(|r| !r.is_empty()) {
            return Ok(AnalysisResult::Compact(CompactResult {
                analysis_id: payload.analysis_id,
                short_report,
                classification: payload.compact.and_then(|c| c.classification),
                created_at: payload.created_at,
            }));
        }

        Ok(AnalysisResult::Full(FullResult {
            analysis_id: payload.analysis_id,
            classification: payload
                .classification
                .ok_or(PayloadError::MissingField("classification"))?,
            confidence: payload
                .confidence
                .ok_or(PayloadError::MissingField("confidence"))?,
            processing_ms: payload
                .processing_ms
                .ok_or(PayloadError::MissingField("processing_ms"))?,
            word_count: payload
                .word_count
                .ok_or(PayloadError::MissingField("word_count"))?,
            created_at: payload.created_at,
        }))
    }
}

impl AnalysisResult {
    /// Parses and validates a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let payload: AnalysisPayload = serde_json::from_str(json)?;
        Self::try_from(payload)
    }

    pub fn analysis_id(&self) -> &AnalysisId {
        match self {
            AnalysisResult::Compact(c) => &c.analysis_id,
            AnalysisResult::Full(f) => &f.analysis_id,
        }
    }

    pub fn created_at(&self) -> Option<&str> {
        match self {
            AnalysisResult::Compact(c) => c.created_at.as_deref(),
            AnalysisResult::Full(f) => f.created_at.as_deref(),
        }
    }

    /// The classification the card is coloured by, if the payload carried one.
    pub fn classification(&self) -> Option<&str> {
        match self {
            AnalysisResult::Compact(c) => c.classification.as_deref(),
            AnalysisResult::Full(f) => Some(f.classification.as_str()),
        }
    }

    /// Relative link to the server's detail page for this analysis.
    pub fn detail_path(&self) -> String {
        format!("/analysis/{}", self.analysis_id())
    }

    /// Suffix of the `result-*` CSS class of the card.
    pub fn state_class(&self) -> String {
        match self {
            AnalysisResult::Compact(c) => c
                .classification
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| "summary".to_string()),
            AnalysisResult::Full(f) => f.classification.to_lowercase(),
        }
    }
}

// --- Chat Wire Types ---

/// Who authored a chat message. Displays as the lowercase name used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    /// The text the bot message should show for this reply.
    pub fn display_text(&self) -> String {
        match (self.success, &self.response) {
            (true, Some(response)) => response.clone(),
            (true, None) => "Error: no response".to_string(),
            (false, _) => {
                let reason = self
                    .error
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .unwrap_or("no response");
                format!("Error: {}", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_report_selects_compact_even_without_classification() {
        let result = AnalysisResult::from_json(
            r#"{"analysis_id": 7, "short_report": "Likely satire.", "compact": {"classification": "FAKE"}}"#,
        )
        .unwrap();

        assert!(matches!(result, AnalysisResult::Compact(_)));
        assert_eq!(result.state_class(), "fake");
        assert_eq!(result.detail_path(), "/analysis/7");
    }

    #[test]
    fn compact_without_compact_block_uses_summary_state() {
        let result = AnalysisResult::from_json(
            r#"{"analysis_id": "a-1", "short_report": "text", "classification": "REAL"}"#,
        )
        .unwrap();
        assert_eq!(result.state_class(), "summary");
    }

    #[test]
    fn empty_short_report_falls_back_to_full() {
        let result = AnalysisResult::from_json(
            r#"{"analysis_id": 3, "short_report": "", "classification": "Real",
                "confidence": 91.5, "processing_ms": 120, "word_count": 340}"#,
        )
        .unwrap();

        match result {
            AnalysisResult::Full(full) => {
                assert_eq!(full.classification, "Real");
                assert_eq!(full.word_count, 340.0);
            }
            other => panic!("expected full result, got {:?}", other),
        }
    }

    #[test]
    fn full_result_requires_classification() {
        let err = AnalysisResult::from_json(
            r#"{"analysis_id": 3, "confidence": 50, "processing_ms": 1, "word_count": 2}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PayloadError::MissingField("classification")));
    }

    #[test]
    fn string_and_numeric_ids_display_verbatim() {
        assert_eq!(AnalysisId::from(42).to_string(), "42");
        assert_eq!(AnalysisId::Text("abc-9".into()).to_string(), "abc-9");
    }

    #[test]
    fn reply_text_follows_success_flag() {
        let ok = ChatReply { success: true, response: Some("Hi there".into()), error: None };
        assert_eq!(ok.display_text(), "Hi there");

        let failed = ChatReply { success: false, response: None, error: Some("rate limited".into()) };
        assert_eq!(failed.display_text(), "Error: rate limited");

        let empty: ChatReply = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.display_text(), "Error: no response");
    }

    #[test]
    fn success_without_response_is_an_error() {
        let reply: ChatReply = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(reply.display_text(), "Error: no response");
    }

    #[test]
    fn fractional_word_count_is_accepted() {
        let result = AnalysisResult::from_json(
            r#"{"analysis_id": 5, "classification": "Real",
                "confidence": 70, "processing_ms": 12.5, "word_count": 340.0}"#,
        )
        .unwrap();

        let AnalysisResult::Full(full) = result else {
            panic!("expected full result");
        };
        assert_eq!(full.word_count, 340.0);
        assert_eq!(full.word_count.to_string(), "340");
    }

    #[test]
    fn float_id_is_accepted_and_printed_like_an_integer() {
        let result =
            AnalysisResult::from_json(r#"{"analysis_id": 3.0, "short_report": "x"}"#).unwrap();
        assert_eq!(result.analysis_id().to_string(), "3");
        assert_eq!(result.detail_path(), "/analysis/3");

        let fractional =
            AnalysisResult::from_json(r#"{"analysis_id": 2.5, "short_report": "x"}"#).unwrap();
        assert_eq!(fractional.analysis_id().to_string(), "2.5");
    }

    #[test]
    fn role_displays_lowercase() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Bot.to_string(), "bot");
    }
}
