//! Borrowed view of a single field's current value.

use chrono::NaiveDate;

/// The current value of one field, as seen by the validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
    Number(Option<i64>),
    Date(Option<NaiveDate>),
}

impl<'a> FieldValue<'a> {
    /// Whether the value counts as "not provided".
    ///
    /// Booleans always count as provided.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Flag(_) => false,
            Self::Number(n) => n.is_none(),
            Self::Date(d) => d.is_none(),
        }
    }

    /// The text content, for text fields only.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Text("").is_empty());
        assert!(!FieldValue::Text(" ").is_empty());
        assert!(!FieldValue::Flag(false).is_empty());
        assert!(FieldValue::Number(None).is_empty());
        assert!(!FieldValue::Number(Some(0)).is_empty());
        assert!(FieldValue::Date(None).is_empty());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(FieldValue::Text("abc").as_text(), Some("abc"));
        assert_eq!(FieldValue::Flag(true).as_text(), None);
    }
}
