//! Application service layer.
//!
//! Services orchestrate the form and its collaborators. They provide a clean
//! boundary between the hosting shell and the data access layer.

mod contact_editor;

pub use contact_editor::{ContactEditor, EditMode};
