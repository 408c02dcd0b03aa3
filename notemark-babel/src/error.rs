//! Error types for conversion operations
//!
//! Failing to recognise a construct is never an error: rules return `None` and the
//! text falls through to the paragraph fallback. Errors are reserved for the edges of
//! the library, that is JSON (de)serialization, collaborators and block sinks.

use thiserror::Error;

/// Errors that can occur at the boundaries of a conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The block-tree JSON could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON was well formed but did not describe a block list
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// No document format with this name
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// A block sink rejected a submission for a reason other than its size
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Failure reported by an external collaborator (resource factory, file uploader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors reported by a [`crate::splitter::BlockSink`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The submission exceeded the destination's payload limit
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    /// Any other rejection; not recoverable by splitting
    #[error("{0}")]
    Rejected(String),
}
