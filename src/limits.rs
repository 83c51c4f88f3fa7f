//! Input limits enforced before rendering
//!
//! Rendering is recursive over the node tree, so the tree's depth is bounded
//! when it is built from HTML. Oversized documents are rejected before parsing.

use crate::error::ConversionError;

/// Maximum allowed nesting depth for HTML elements
/// Prevents stack overflow from deeply nested structures
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Default maximum input size in bytes
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1_000_000;

/// Size and depth limits applied to HTML input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// Maximum input size in bytes (`None` = unlimited)
    pub max_input_bytes: Option<usize>,
    /// Maximum element nesting depth accepted by the parser
    pub max_nesting_depth: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl InputLimits {
    /// Limits with no size cap and the default depth cap
    pub fn unlimited_size() -> Self {
        Self {
            max_input_bytes: None,
            ..Self::default()
        }
    }

    /// Validate the input size
    ///
    /// # Examples
    ///
    /// ```
    /// use html_markdown_converter::limits::InputLimits;
    ///
    /// let limits = InputLimits { max_input_bytes: Some(10), ..Default::default() };
    /// assert!(limits.check_size(10).is_ok());
    /// assert!(limits.check_size(11).is_err());
    /// ```
    pub fn check_size(&self, size: usize) -> Result<(), ConversionError> {
        match self.max_input_bytes {
            Some(limit) if size > limit => Err(ConversionError::InputTooLarge { size, limit }),
            _ => Ok(()),
        }
    }

    /// Validate element nesting depth
    pub fn check_depth(&self, depth: usize) -> Result<(), ConversionError> {
        if depth > self.max_nesting_depth {
            return Err(ConversionError::ParseError(format!(
                "element nesting depth exceeds maximum of {}",
                self.max_nesting_depth
            )));
        }
        Ok(())
    }
}
