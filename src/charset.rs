//! Character encoding detection for byte input
//!
//! Files and standard input arrive as bytes. Before html5ever sees them they
//! are decoded to UTF-8 using the first encoding found by:
//!
//! 1. A byte order mark
//! 2. A `<meta charset>` or `<meta http-equiv="Content-Type">` declaration in
//!    the first 1024 bytes
//! 3. UTF-8

use std::borrow::Cow;
use std::sync::OnceLock;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use regex::Regex;

use crate::error::ConversionError;

/// Maximum bytes to scan for meta charset declarations
const META_SCAN_LIMIT: usize = 1024;

/// Find the charset label declared by a `<meta>` tag, if any
///
/// Both the HTML5 form (`<meta charset="...">`) and the HTML4 form
/// (`<meta http-equiv="Content-Type" content="text/html; charset=...">`)
/// are recognized.
///
/// # Examples
///
/// ```
/// use html_markdown_converter::charset::extract_charset_from_html;
///
/// let html = b"<meta charset=\"windows-1252\"><p>x</p>";
/// assert_eq!(extract_charset_from_html(html), Some("windows-1252".to_string()));
/// assert_eq!(extract_charset_from_html(b"<p>none</p>"), None);
/// ```
pub fn extract_charset_from_html(html: &[u8]) -> Option<String> {
    static META_CHARSET: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = META_CHARSET
        .get_or_init(|| {
            Regex::new(r#"(?i)<meta\b[^>]*?\bcharset\s*=\s*["']?([A-Za-z0-9_.:\-]+)"#).ok()
        })
        .as_ref()?;

    let prefix = &html[..html.len().min(META_SCAN_LIMIT)];
    // Lossy is fine here: declarations are ASCII
    let prefix = String::from_utf8_lossy(prefix);

    regex
        .captures(&prefix)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Detect the encoding of an HTML byte stream
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    match extract_charset_from_html(html).and_then(|label| Encoding::for_label(label.as_bytes())) {
        // A meta tag that could be read as ASCII cannot really be UTF-16
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => UTF_8,
        Some(encoding) => encoding,
        None => UTF_8,
    }
}

/// Decode HTML bytes to UTF-8 text
///
/// Valid UTF-8 input without a BOM is borrowed, not copied.
///
/// # Errors
///
/// Returns `ConversionError::EncodingError` when the bytes are not valid in the
/// detected encoding.
pub fn decode_html(html: &[u8]) -> Result<Cow<'_, str>, ConversionError> {
    let (encoding, bom_len) = match Encoding::for_bom(html) {
        Some((encoding, bom_len)) => (encoding, bom_len),
        None => (detect_encoding(html), 0),
    };
    let body = &html[bom_len..];

    tracing::debug!(encoding = encoding.name(), bytes = html.len(), "decoding HTML input");

    if encoding == UTF_8 {
        return std::str::from_utf8(body).map(Cow::Borrowed).map_err(|e| {
            ConversionError::EncodingError(format!(
                "Invalid UTF-8 at byte position {}: {}",
                e.valid_up_to() + bom_len,
                e
            ))
        });
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            ConversionError::EncodingError(format!(
                "Invalid byte sequence for charset '{}'",
                encoding.name()
            ))
        })
}
