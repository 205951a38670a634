//! URL validation for submitted url items.
//!
//! Blocks dangerous schemes, allows http/https only.

use url::Url;

use crate::errors::{Result, SharekeyError};

/// Dangerous schemes rejected outright
const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// Validate a submitted URL.
///
/// Checks:
/// 1. URL is not empty
/// 2. Not a dangerous scheme (javascript:, data:, file:, ...)
/// 3. Scheme is http or https
/// 4. URL parses
pub fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(SharekeyError::validation("URL cannot be empty"));
    }

    let url_lower = url.to_lowercase();

    for scheme in DANGEROUS_SCHEMES {
        if url_lower.starts_with(scheme) {
            return Err(SharekeyError::validation("This URL scheme is not allowed"));
        }
    }

    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        return Err(SharekeyError::validation(
            "URL must start with http:// or https://",
        ));
    }

    Url::parse(url)
        .map_err(|e| SharekeyError::validation(format!("Invalid URL format: {}", e)))?;

    Ok(())
}
