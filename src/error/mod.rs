//! Error types and handling infrastructure for key conversion
//!
//! The converter itself never fails. Errors only appear at the edges:
//! building a [`Document`](crate::graph::Document), parsing JSON, reading
//! inputs and expanding a graph back into JSON.

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

use crate::graph::NodeId;
use crate::validation::ValidationError;

/// Errors raised by the document graph builder and by JSON expansion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {node} is a {found}, expected a {expected}")]
    WrongContainer {
        node: NodeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cycle detected at path: {path}")]
    Cycle { path: String },
}

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        location: Option<(usize, usize)>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("JSON too large: {size} bytes (limit: {limit} bytes)")]
    JsonTooLarge { size: usize, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl ConversionErrorKind {
    pub fn json_parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::JsonParse { message, location }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(message, location))
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let message = match &path {
            Some(p) => format!("{}: {}", p.display(), err),
            None => err.to_string(),
        };
        Self::conversion_with_source(ConversionErrorKind::io(message, path), err.into())
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("JSON parse error: {}", err.message)
                }
            }
            Self::Graph(GraphError::Cycle { path }) => {
                format!("Cannot serialize cyclic document (cycle at {})", path)
            }
            Self::Graph(err) => format!("Invalid document: {}", err),
            Self::Validation(ValidationError::MaxDepthExceeded { max, .. }) => {
                format!("JSON nesting deeper than {} levels", max)
            }
            Self::Validation(err) => format!("Invalid structure: {}", err),
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::JsonTooLarge { size, limit } => {
                    format!(
                        "JSON input too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let location = (err.line() > 0).then(|| (err.line(), err.column()));
        // serde_json appends " at line X column Y"; keep only the reason
        let message = err.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) if location.is_some() => message[..idx].to_string(),
            _ => message,
        };
        Self::new(message, location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
