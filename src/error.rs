//! Error types for the contact form.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field-level failures ([`FieldError`]) are reported as per-field state and never
//! returned from form operations; the remaining types are returned through `Result`.

use thiserror::Error;

/// A validation failure attached to a single form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is required but empty
    #[error("Value is required")]
    MissingValue,

    /// The text is shorter than the configured minimum
    #[error("Must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// The text contains one or more forbidden words
    #[error("Contains forbidden words: {}", words.join(", "))]
    ForbiddenWord { words: Vec<String> },
}

/// Errors reported by a contact store collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Contact store unavailable: {0}")]
    Unavailable(String),

    /// The store refused to persist the contact
    #[error("Failed to persist contact: {0}")]
    PersistFailed(String),

    /// The store answered with an error status
    #[error("Store error (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Failed to encode or decode a contact
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,
}

/// Errors surfaced by the contact editor's load/save lifecycle.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Loading the contact failed; the form keeps its create-mode defaults
    #[error("Could not load contact: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// Saving the contact failed; no navigation took place
    #[error("Could not save contact: {0}")]
    PersistFailed(#[source] StoreError),

    /// `initialize` was called more than once
    #[error("Editor already initialized")]
    AlreadyInitialized,
}

/// Errors raised when an edit targets a part of the form that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The phone index is out of range
    #[error("No phone entry at index {index} (form has {len})")]
    NoSuchPhone { index: usize, len: usize },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Outcome of running one rule against one value.
pub type ValidationResult = Result<(), FieldError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with EditorError
pub type EditorResult<T> = Result<T, EditorError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
