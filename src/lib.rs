//! HTML Markdown Converter
//!
//! Converts HTML documents into Markdown that keeps their structure
//! (headings, paragraphs, nested lists, fenced code, emphasis, links) while
//! normalizing whitespace and line breaks.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `parser`: HTML5 parsing using html5ever, lowered into a [`Node`] tree
//! - `charset`: Character encoding detection for byte input
//! - `filter`: Removal of elements by tag name before rendering
//! - `converter`: Markdown rendering of the node tree
//! - `whitespace`: Whitespace normalization of text fragments
//! - `limits`: Input size and nesting limits
//! - `node`: The node tree shared by all of the above
//!
//! # Examples
//!
//! ```rust
//! use html_markdown_converter::{ConversionOptions, convert};
//!
//! let markdown = convert("<h1>Title</h1><p>Hello <b>world</b>.</p>", &ConversionOptions::default())
//!     .expect("convert");
//! assert_eq!(markdown, "# Title\n\nHello **world**.\n\n");
//! ```

use std::fs;
use std::path::Path;

// Module declarations
pub mod charset;
pub mod converter;
pub mod error;
pub mod filter;
pub mod limits;
pub mod node;
pub mod parser;
pub mod whitespace;

// Re-export main types for convenience
pub use converter::{ConversionOptions, MarkdownConverter, RenderContext};
pub use error::ConversionError;
pub use filter::{FilterSet, filter};
pub use limits::InputLimits;
pub use node::{Element, Node};
pub use parser::parse_html;

/// Convert an HTML document to Markdown: parse, filter, render
///
/// # Errors
///
/// See [`MarkdownConverter::convert`].
pub fn convert(html: &str, options: &ConversionOptions) -> Result<String, ConversionError> {
    MarkdownConverter::with_options(options.clone()).convert(html)
}

/// Render an already parsed (and filtered) tree with default options
pub fn render(tree: &Node) -> String {
    MarkdownConverter::new().render(tree)
}

/// Write Markdown to a file
///
/// # Errors
///
/// Returns `ConversionError::IoError` carrying `path` when the write fails.
pub fn write_markdown(path: &Path, markdown: &str) -> Result<(), ConversionError> {
    fs::write(path, markdown).map_err(|e| ConversionError::io(path, e))
}
