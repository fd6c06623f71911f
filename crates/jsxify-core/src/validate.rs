//! Structural guard run before any rewrite.
//!
//! This only looks for the root element tokens. It does not balance tags or
//! check attributes.

use crate::traits::ConvertError;

/// Opening root token (matches `<svg>` and `<svg ...>`).
pub const ROOT_OPEN: &str = "<svg";

/// Closing root token.
pub const ROOT_CLOSE: &str = "</svg>";

/// Check that the source contains both root element tokens.
pub fn validate(source: &str) -> Result<(), ConvertError> {
    if source.contains(ROOT_OPEN) && source.contains(ROOT_CLOSE) {
        Ok(())
    } else {
        Err(ConvertError::Format)
    }
}
