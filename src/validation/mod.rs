//! Field validation rules.
//!
//! Rules are pure functions over a borrowed [`FieldValue`]; they hold no UI
//! state and are cheap enough to run on every keystroke.

pub mod rules;
pub mod value;

pub use rules::{
    blacklist, min_length, required, Blacklist, Rule, RuleKind, DEFAULT_NOTES_BLACKLIST,
};
pub use value::FieldValue;
