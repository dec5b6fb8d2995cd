//! Endpoint URL validation for request targets.

use url::Url;

use crate::error::ValidationError;

/// Validate and normalise a request URL.
///
/// The scheme must be `http` or `https` and a host is required. A URL
/// without a path gets `/` appended.
///
/// # Errors
///
/// - [`ValidationError::InvalidUrl`] when the text is not a URL at all
/// - [`ValidationError::UnsupportedScheme`] for anything but http/https
/// - [`ValidationError::MissingHost`] when no host is present
pub fn validate_url(value: &str) -> Result<String, ValidationError> {
    let parsed = Url::parse(value).map_err(|err| ValidationError::InvalidUrl(err.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::MissingHost);
    }

    // `Url` already normalises an empty path to `/` for special schemes.
    Ok(parsed.into())
}
