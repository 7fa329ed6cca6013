// src/core/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

use crate::core::error::ConfigError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Connection settings for the TruthGuard server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the web application; endpoint paths are resolved against it.
    pub base_url: Url,
    /// Optional per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            request_timeout_secs: None,
            user_agent: format!("TruthGuardClient/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file is
    /// used when present and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => {
                    debug!("No config file found, using defaults.");
                    Ok(Self::default())
                }
            },
        }
    }

    /// `<config dir>/truthguard-client/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "truthguard", env!("CARGO_PKG_NAME"))
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn with_base_url(mut self, base_url: Option<Url>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        info!(path = %shown, "Loaded config file.");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url": "https://truthguard.example/app/"}}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url.as_str(), "https://truthguard.example/app/");
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.user_agent.starts_with("TruthGuardClient/"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "base_url = 3").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn base_url_override_wins() {
        let url = Url::parse("http://localhost:8080/").unwrap();
        let config = Config::default().with_base_url(Some(url.clone()));
        assert_eq!(config.base_url, url);

        let untouched = Config::default().with_base_url(None);
        assert_eq!(untouched.base_url.as_str(), DEFAULT_BASE_URL);
    }
}
