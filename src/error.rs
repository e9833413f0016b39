//! Error types surfaced by the workflow.
//!
//! Every failure is caught at the step boundary and converted into a
//! [`crate::workflow::StepResult::Error`]; nothing here escapes to the caller as a panic.

use serde::Serialize;
use thiserror::Error;

/// Upper bound on the raw completion text echoed back in a parse failure.
pub const RAW_EXCERPT_CHARS: usize = 800;

/// Completion text that could not be coerced into a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse model output as JSON: {message}")]
pub struct ParseError {
    pub message: String,
    pub raw_excerpt: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, raw: &str) -> Self {
        Self {
            message: message.into(),
            raw_excerpt: excerpt(raw, RAW_EXCERPT_CHARS),
        }
    }
}

/// First `limit` characters of `text`, cut on a char boundary.
pub fn excerpt(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No usable LLM client, typically a missing API key.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The LLM service call failed.
    #[error("LLM request failed: {0}")]
    Transport(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A step ran before the record it builds on was generated.
    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),
}

impl WorkflowError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn missing_prerequisite(msg: impl Into<String>) -> Self {
        Self::MissingPrerequisite(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Configuration(_) => ErrorKind::Configuration,
            WorkflowError::Transport(_) => ErrorKind::Transport,
            WorkflowError::Parse(_) => ErrorKind::Parse,
            WorkflowError::MissingPrerequisite(_) => ErrorKind::MissingPrerequisite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "ConfigurationError")]
    Configuration,
    #[serde(rename = "TransportError")]
    Transport,
    #[serde(rename = "ParseError")]
    Parse,
    #[serde(rename = "MissingPrerequisite")]
    MissingPrerequisite,
}

/// Error half of the tagged result handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSignal {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(rename = "rawExcerpt", skip_serializing_if = "Option::is_none")]
    pub raw_excerpt: Option<String>,
}

impl From<&WorkflowError> for ErrorSignal {
    fn from(error: &WorkflowError) -> Self {
        let raw_excerpt = match error {
            WorkflowError::Parse(parse) => Some(parse.raw_excerpt.clone()),
            _ => None,
        };
        Self {
            kind: error.kind(),
            message: error.to_string(),
            raw_excerpt,
        }
    }
}
