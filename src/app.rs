// src/app.rs

use crate::core::chat::{ChatEvent, ChatWidget};
use crate::core::controls::{self, LoadingIndicator, SPINNER_CHARS};
use crate::core::error::PayloadError;
use crate::core::models::AnalysisResult;
use crate::core::results::{self, ResultsContainer};
use std::path::PathBuf;
use tracing::{error, info, warn};
use url::Url;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

/// Everything the background tasks report back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Chat(ChatEvent),
    ResultLoaded(Result<AnalysisResult, PayloadError>),
}

impl From<ChatEvent> for AppEvent {
    fn from(event: ChatEvent) -> Self {
        AppEvent::Chat(event)
    }
}

pub struct App {
    pub should_quit: bool,
    pub base_url: Url,
    pub result_source: Option<PathBuf>,
    pub results: ResultsContainer,
    pub load_error: Option<String>,
    pub loading: LoadingIndicator,
    pub spinner_frame: usize,
    pub chat: ChatWidget,
    pub scroll_offset: u16,
    pub notice: Option<String>,
    pub export_status: ExportStatus,
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(base_url: Url, result_source: Option<PathBuf>, export_dir: PathBuf) -> Self {
        Self {
            should_quit: false,
            base_url,
            result_source,
            results: ResultsContainer::default(),
            load_error: None,
            loading: LoadingIndicator::default(),
            spinner_frame: 0,
            chat: ChatWidget::new(),
            scroll_offset: 0,
            notice: None,
            export_status: ExportStatus::Idle,
            export_dir,
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn on_tick(&mut self) {
        self.loading.tick();
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
    }

    /// Current frame of the spinner shown next to in-flight chat placeholders.
    pub fn spinner_glyph(&self) -> char {
        SPINNER_CHARS[self.spinner_frame]
    }

    pub fn quit(&mut self) { self.should_quit = true; }

    /// Marks the start of a payload load and returns the file to read, if any.
    pub fn begin_load(&mut self) -> Option<PathBuf> {
        let path = self.result_source.clone()?;
        self.loading.show(true);
        self.load_error = None;
        Some(path)
    }

    /// Applies an event coming back from a background task.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Chat(event) => self.chat.resolve(event),
            AppEvent::ResultLoaded(outcome) => {
                self.loading.show(false);
                match outcome {
                    Ok(result) => {
                        self.scroll_offset = 0;
                        self.export_status = ExportStatus::Idle;
                        results::display_results(Some(&mut self.results), &result);
                    }
                    Err(e) => {
                        error!(error = %e, "Could not load analysis payload.");
                        self.results.hide();
                        self.load_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    /// Absolute link to the detail page of the result on screen.
    pub fn detail_link(&self) -> Option<String> {
        let result = self.results.current()?;
        match self.base_url.join(&result.detail_path()) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                warn!(error = %e, "Could not build detail link, using relative path.");
                Some(result.detail_path())
            }
        }
    }

    pub fn copy_detail_link(&mut self) {
        let Some(link) = self.detail_link() else {
            self.notice = Some("Nothing to copy yet.".to_string());
            return;
        };
        self.notice = Some(match controls::copy_to_clipboard(&link) {
            Ok(()) => {
                info!(link = %link, "Detail link copied.");
                "Copied to clipboard!".to_string()
            }
            Err(e) => {
                warn!(error = %e, "Clipboard write failed.");
                format!("Copy failed: {}", e)
            }
        });
    }

    /// Writes the rendered result card next to the log file.
    pub fn export_html(&mut self) {
        let Some(result) = self.results.current() else {
            self.export_status = ExportStatus::Error("No analysis loaded.".to_string());
            return;
        };
        let path = self.export_dir.join(export_file_name(&result.analysis_id().to_string()));

        let written = std::fs::create_dir_all(&self.export_dir)
            .and_then(|_| std::fs::write(&path, self.results.html()));
        self.export_status = match written {
            Ok(()) => {
                info!(path = %path.display(), "Result card exported.");
                ExportStatus::Success(path.display().to_string())
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Export failed.");
                ExportStatus::Error(e.to_string())
            }
        };
    }
}

/// File name for an exported card. The id comes from the server, so anything
/// outside `[A-Za-z0-9._-]` becomes `_` and dots cannot form `..`.
fn export_file_name(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    format!("analysis-{}.html", safe.replace("..", "__"))
}
