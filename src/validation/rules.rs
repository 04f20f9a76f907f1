//! Built-in validation rules.

use super::value::FieldValue;
use crate::error::{FieldError, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Words the notes field rejects unless configured otherwise.
pub static DEFAULT_NOTES_BLACKLIST: Lazy<Blacklist> = Lazy::new(|| {
    // SAFETY: escaped literal alternation always compiles
    Blacklist::new(["foo", "bar"]).expect("default blacklist compiles")
});

/// Fails with `MissingValue` when the value is empty.
pub fn required(value: FieldValue<'_>) -> ValidationResult {
    if value.is_empty() {
        Err(FieldError::MissingValue)
    } else {
        Ok(())
    }
}

/// Fails with `TooShort` when a non-empty text has fewer than `min` characters.
///
/// Empty text passes; pair with [`required`] to reject it.
pub fn min_length(min: usize, value: FieldValue<'_>) -> ValidationResult {
    let Some(text) = value.as_text() else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }

    let actual = text.chars().count();
    if actual < min {
        Err(FieldError::TooShort { min, actual })
    } else {
        Ok(())
    }
}

/// Fails with `ForbiddenWord` when the text contains any blacklisted word.
pub fn blacklist(words: &Blacklist, value: FieldValue<'_>) -> ValidationResult {
    let Some(text) = value.as_text() else {
        return Ok(());
    };

    let hits = words.find_in(text);
    if hits.is_empty() {
        Ok(())
    } else {
        Err(FieldError::ForbiddenWord { words: hits })
    }
}

/// A compiled list of forbidden words.
///
/// Matching is a case-sensitive substring search: `"food"` contains `"foo"`.
#[derive(Clone)]
pub struct Blacklist {
    words: Vec<String>,
    pattern: Option<Regex>,
}

impl Blacklist {
    /// Compile a word list. Blank words are ignored.
    pub fn new<I, S>(words: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for word in words {
            let word = word.into();
            if !word.is_empty() && !list.contains(&word) {
                list.push(word);
            }
        }

        let pattern = if list.is_empty() {
            None
        } else {
            // Longest first so overlapping words report the longer one
            let mut alternatives: Vec<&String> = list.iter().collect();
            alternatives.sort_by_key(|w| std::cmp::Reverse(w.len()));
            let source = alternatives
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&source)?)
        };

        Ok(Self {
            words: list,
            pattern,
        })
    }

    /// The configured words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Distinct forbidden words found in `text`, in order of first appearance.
    pub fn find_in(&self, text: &str) -> Vec<String> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        let mut hits: Vec<String> = Vec::new();
        for found in pattern.find_iter(text) {
            let word = found.as_str();
            if !hits.iter().any(|h| h == word) {
                hits.push(word.to_string());
            }
        }
        hits
    }
}

impl PartialEq for Blacklist {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl fmt::Debug for Blacklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blacklist")
            .field("words", &self.words)
            .finish()
    }
}

/// Tag identifying a rule regardless of its parameters.
///
/// Units add and remove rules by kind, e.g. "drop the required rule".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    Required,
    MinLength,
    Blacklist,
}

/// A validation rule attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    Blacklist(Blacklist),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::MinLength(_) => RuleKind::MinLength,
            Self::Blacklist(_) => RuleKind::Blacklist,
        }
    }

    /// Run the rule against a value.
    pub fn check(&self, value: FieldValue<'_>) -> ValidationResult {
        match self {
            Self::Required => required(value),
            Self::MinLength(min) => min_length(*min, value),
            Self::Blacklist(words) => blacklist(words, value),
        }
    }
}
