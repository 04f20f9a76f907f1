//! Routing collaborators: where the editor goes after a save, and how it
//! learns which contact to edit.

use std::collections::HashMap;

/// Moves the user to another page. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Supplies the route's contact identifier, read once at initialization.
pub trait RouteParameterSource {
    fn contact_id(&self) -> Option<String>;
}

/// A snapshot of route parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Name of the parameter holding the contact identifier.
    pub const CONTACT_ID: &'static str = "id";

    pub fn new() -> Self {
        Self::default()
    }

    /// Route for editing the contact `id`.
    pub fn for_contact(id: impl Into<String>) -> Self {
        Self::new().with(Self::CONTACT_ID, id)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl RouteParameterSource for RouteParams {
    fn contact_id(&self) -> Option<String> {
        self.get(Self::CONTACT_ID).map(str::to_string)
    }
}

impl RouteParameterSource for Option<String> {
    fn contact_id(&self) -> Option<String> {
        self.clone()
    }
}

/// Navigator that only records the navigation in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn go_to(&self, path: &str) {
        tracing::info!(path, "Navigating");
    }
}
