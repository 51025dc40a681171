//! SQL identifier hygiene for provider queries.
//!
//! Dataset and field names arrive from callers and remote schemas and are
//! interpolated into query text, so everything passes through
//! [`escape_identifier`] first. Rejections surface as
//! [`ClassifyError::InvalidIdentifier`], which the engine absorbs into the
//! fallback path like any other provider failure.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ClassifyError, Result};

/// Longest accepted identifier, matching common database column-name limits.
const MAX_IDENTIFIER_LENGTH: usize = 128;

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("hard-coded identifier pattern is valid")
});

/// Validates an identifier without escaping it.
///
/// Accepts the usual unquoted SQL identifier shape: a leading letter or
/// underscore followed by letters, digits, and underscores, up to 128
/// characters.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(ClassifyError::InvalidIdentifier(
            "identifier is empty".to_string(),
        ));
    }
    if identifier.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ClassifyError::InvalidIdentifier(format!(
            "identifier is {} characters long (max {MAX_IDENTIFIER_LENGTH})",
            identifier.len()
        )));
    }
    if identifier.contains('\0') {
        return Err(ClassifyError::InvalidIdentifier(
            "identifier contains a null byte".to_string(),
        ));
    }
    if !IDENTIFIER_RE.is_match(identifier) {
        return Err(ClassifyError::InvalidIdentifier(format!(
            "'{identifier}' must start with a letter or underscore and contain only letters, digits, and underscores"
        )));
    }
    Ok(())
}

/// Validates an identifier and wraps it in double quotes for safe
/// interpolation into SQL.
///
/// ```
/// use choroscale::provider::sql::escape_identifier;
///
/// assert_eq!(escape_identifier("medhinc_cy").unwrap(), "\"medhinc_cy\"");
/// assert!(escape_identifier("id; DROP TABLE tracts").is_err());
/// ```
pub fn escape_identifier(identifier: &str) -> Result<String> {
    validate_identifier(identifier)?;
    Ok(format!("\"{identifier}\""))
}
