//! Domain validation errors.

use std::fmt;

/// Errors that can occur while constructing a domain value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided identifier is empty or whitespace.
    EmptyId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Contact ID cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
