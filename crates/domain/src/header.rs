//! Request header — a name/value pair sent with every request.

use std::fmt;

use crate::error::ValidationError;

/// A single request header.
///
/// Headers are kept in insertion order and never deduplicated: two headers
/// with the same name are both sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Create a header.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHeaderName`] if `name` is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyHeaderName);
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_header_with_name_and_value() {
        let header = Header::new("X-Test", "1").unwrap();
        assert_eq!(header.name(), "X-Test");
        assert_eq!(header.value(), "1");
    }

    #[test]
    fn should_allow_empty_value() {
        let header = Header::new("X-Empty", "").unwrap();
        assert_eq!(header.value(), "");
    }

    #[test]
    fn should_reject_blank_name() {
        assert_eq!(
            Header::new("  ", "1"),
            Err(ValidationError::EmptyHeaderName)
        );
    }

    #[test]
    fn should_display_as_name_colon_value() {
        let header = Header::new("Accept", "text/plain").unwrap();
        assert_eq!(header.to_string(), "Accept: text/plain");
    }
}
