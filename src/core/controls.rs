// src/core/controls.rs

//! Small stateful controls shared by the views: a maskable text field, the
//! loading spinner, clipboard access, and timestamp formatting.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use crossterm::{clipboard::CopyToClipboard, execute};
use std::borrow::Cow;
use std::io::{self, Write};
use tracing::debug;

use crate::core::error::DateError;

/// Frames of the loading spinner, advanced once per UI tick.
pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const MASK_CHAR: char = '•';

/// A single-line text input whose contents can be hidden like a password field.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    masked: bool,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Switches between hidden and plain display. Calling it twice restores the original state.
    pub fn toggle_visibility(&mut self) {
        self.masked = !self.masked;
        debug!(masked = self.masked, "Input visibility toggled.");
    }

    /// What the field shows on screen.
    pub fn display(&self) -> Cow<'_, str> {
        if self.masked {
            Cow::Owned(MASK_CHAR.to_string().repeat(self.value.chars().count()))
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    /// Column of the cursor, counted in characters.
    pub fn cursor(&self) -> usize {
        self.value.chars().count()
    }
}

/// Visibility and animation state of the loading spinner.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    visible: bool,
    frame: usize,
}

impl LoadingIndicator {
    pub fn show(&mut self, show: bool) {
        self.visible = show;
        if !show {
            self.frame = 0;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn tick(&mut self) {
        if self.visible {
            self.frame = (self.frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn glyph(&self) -> char {
        SPINNER_CHARS[self.frame]
    }
}

/// Places `text` on the system clipboard through the terminal (OSC 52).
pub fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, CopyToClipboard::to_clipboard_from(text))?;
    stdout.flush()
}

/// Formats a server timestamp as local date and time.
pub fn format_date(input: &str) -> Result<String, DateError> {
    format_date_in(input, &Local)
}

/// Formats a server timestamp in the given time zone.
///
/// Accepts RFC 3339, the naive `YYYY-MM-DD HH:MM:SS[.f]` forms (taken as UTC),
/// and a bare `YYYY-MM-DD`.
pub fn format_date_in<Tz>(input: &str, tz: &Tz) -> Result<String, DateError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let instant = parse_timestamp(input.trim())
        .ok_or_else(|| DateError::Unparseable(input.to_string()))?;
    Ok(instant.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string())
}

fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
