//! Error types for conversion operations

use std::io;
use std::path::PathBuf;

/// Errors that can occur during HTML to Markdown conversion
///
/// Rendering itself never fails; every variant here comes from the input side
/// (decoding, parsing, size limits) or from file I/O around a conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The document could not be turned into a node tree
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Input bytes are invalid for the detected charset
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Input exceeds the configured size limit
    #[error("Input HTML of {size} bytes exceeds maximum size of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// Reading the input or writing the output failed
    #[error("I/O error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConversionError {
    /// Wrap an I/O error together with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConversionError::IoError {
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures of the parse stage (decoding included)
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ConversionError::ParseError(_)
                | ConversionError::EncodingError(_)
                | ConversionError::InputTooLarge { .. }
        )
    }
}
