//! Distinct-change detection against an explicit previous snapshot.

/// Remembers the last observed value and reports whether a new one differs.
///
/// Comparison is structural (`PartialEq`), so re-emitting an equal value is
/// never mistaken for a change.
#[derive(Debug, Clone)]
pub struct DistinctChanges<T: Clone + PartialEq> {
    previous: Option<T>,
}

impl<T: Clone + PartialEq> DistinctChanges<T> {
    /// No snapshot yet: the first observed value counts as a change.
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Start from a known value: only a different value counts as a change.
    pub fn seeded(value: T) -> Self {
        Self {
            previous: Some(value),
        }
    }

    /// Record `next` and return `true` if it differs from the snapshot.
    pub fn observe(&mut self, next: &T) -> bool {
        if self.previous.as_ref() == Some(next) {
            return false;
        }
        self.previous = Some(next.clone());
        true
    }

    /// Replace the snapshot without reporting a change.
    pub fn reset(&mut self, value: T) {
        self.previous = Some(value);
    }

    pub fn snapshot(&self) -> Option<&T> {
        self.previous.as_ref()
    }
}

impl<T: Clone + PartialEq> Default for DistinctChanges<T> {
    fn default() -> Self {
        Self::new()
    }
}
