use serde::{Serialize, Deserialize};
use std::fmt;

/// Broad category of a failure. Callers branch on this, never on `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// NaN/infinite/out-of-domain arguments. Fatal, nothing is persisted.
    #[error("invalid input")]
    InvalidInput,
    #[error("i/o failure")]
    Io,
    #[error("parse failure")]
    Parse,
    #[error("configuration error")]
    Config,
    #[error("unknown error")]
    Unknown,
}

/// Unified error type for the coaching core.
/// All fallible functions return Result<T, CoachError>.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachError {
    pub kind: ErrorKind,
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl CoachError {
    /// Create a new error with kind, message and stage
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S, stage: &'static str) -> Self {
        CoachError {
            kind,
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Shorthand for an input-validation failure
    pub fn invalid_input<S: Into<String>>(message: S, stage: &'static str) -> Self {
        Self::new(ErrorKind::InvalidInput, message, stage)
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind == ErrorKind::InvalidInput
    }
}

impl fmt::Display for CoachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.kind, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for CoachError {}

impl From<anyhow::Error> for CoachError {
    fn from(err: anyhow::Error) -> Self {
        CoachError::new(ErrorKind::Unknown, err.to_string(), "unknown").with_source("anyhow")
    }
}

impl From<std::io::Error> for CoachError {
    fn from(err: std::io::Error) -> Self {
        CoachError::new(ErrorKind::Io, format!("I/O error: {}", err), "io")
            .with_source("std::io")
    }
}

impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        CoachError::new(ErrorKind::Parse, format!("JSON error: {}", err), "json_parse")
            .with_source("serde_json")
    }
}

impl From<toml::de::Error> for CoachError {
    fn from(err: toml::de::Error) -> Self {
        CoachError::new(ErrorKind::Config, format!("TOML error: {}", err), "config")
            .with_source("toml")
    }
}
