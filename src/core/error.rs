//! Error types shared across the pipeline

use std::io;

use thiserror::Error;

/// Errors raised while turning an ink document into recognized output.
///
/// Any of these aborts the whole request; partial results are never
/// surfaced as if complete.
#[derive(Debug, Error)]
pub enum InklineError {
    /// A stroke carried no parseable coordinate data
    #[error("stroke {stroke} has no valid coordinate data")]
    InvalidInput { stroke: usize },

    /// The ink document contained no strokes at all
    #[error("ink document contains no strokes")]
    EmptyInput,

    /// The recognizer report is missing the expected expression line
    #[error("recognizer report for fragment {fragment} contains no LaTeX line")]
    MalformedRecognizerOutput { fragment: usize },

    /// The recognizer reported a diagnostic for one fragment
    #[error("recognizer diagnostic for fragment {fragment}: {message}")]
    RecognizerDiagnostic { fragment: usize, message: String },

    /// A recognition artifact lacks a required structural element
    #[error("artifact for line {line} is missing {what}")]
    MissingStructure { line: usize, what: String },

    /// I/O error (staging files, artifacts, outputs)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML parsing error in an ink document or artifact
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Result type for core pipeline operations
pub type Result<T> = std::result::Result<T, InklineError>;
