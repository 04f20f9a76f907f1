//! ContactId value object.

use super::errors::ValidationError;
use std::fmt;

/// Identifier of a stored contact.
///
/// Route parameters arrive as raw strings; a blank one means "create a new
/// contact", so the only way to get a `ContactId` is through a non-blank value.
///
/// # Example
///
/// ```
/// use contact_form::domain::ContactId;
///
/// let id = ContactId::new("42").unwrap();
/// assert_eq!(id.as_str(), "42");
/// assert!(ContactId::from_route(Some("  ".to_string())).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactId(String);

impl ContactId {
    /// Create a new ContactId, rejecting blank values.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if nothing remains after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Interpret an optional route parameter.
    ///
    /// Absent and blank parameters both mean create mode.
    pub fn from_route(param: Option<String>) -> Option<Self> {
        param.and_then(|raw| Self::new(raw).ok())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_id_valid() {
        let id = ContactId::new("5").unwrap();
        assert_eq!(id.as_str(), "5");
    }

    #[test]
    fn test_contact_id_rejects_blank() {
        assert_eq!(ContactId::new(""), Err(ValidationError::EmptyId));
        assert_eq!(ContactId::new("   "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_contact_id_trims() {
        let id = ContactId::new(" 7 ").unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn test_from_route() {
        assert!(ContactId::from_route(None).is_none());
        assert!(ContactId::from_route(Some(String::new())).is_none());
        assert_eq!(
            ContactId::from_route(Some("3".to_string())).map(ContactId::into_inner),
            Some("3".to_string())
        );
    }

    #[test]
    fn test_display_is_raw_value() {
        let id = ContactId::new("contact_123").unwrap();
        assert_eq!(id.to_string(), "contact_123");
    }
}
