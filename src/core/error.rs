// src/core/error.rs

use thiserror::Error;

/// Raised when an analysis payload cannot be turned into a renderable result.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload file could not be read.
    #[error("could not read analysis payload: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON or has the wrong shape.
    #[error("invalid analysis payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A field that the full result card needs was not supplied.
    #[error("analysis payload is missing `{0}` and has no short report")]
    MissingField(&'static str),
}

/// Failures on the way to or from the chat endpoint.
///
/// The `Display` output is what the user sees after "Network error: ", so the
/// variants forward the underlying message unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint url: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("unrecognised date: {0:?}")]
    Unparseable(String),
}
