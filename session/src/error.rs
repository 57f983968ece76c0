use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("search session is closed")]
    Closed,
}

/// Failure reported by a [`SearchExecutor`](crate::SearchExecutor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ExecutorError {
    pub message: String,
    pub status_code: Option<u16>,
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "search failed with status {code}: {}", self.message),
            None => write!(f, "search failed: {}", self.message),
        }
    }
}

impl ExecutorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
