//! Field descriptor map: the current rule set and errors of every field in a
//! sub-record.
//!
//! Rules are never attached implicitly. The reactive units add and remove them
//! by [`RuleKind`] and then ask for re-validation, so the error state always
//! reflects the rule set at the moment of the last `revalidate` call.

use crate::error::FieldError;
use crate::validation::{FieldValue, Rule, RuleKind};
use std::collections::BTreeMap;
use std::fmt;

/// A closed set of field names for one sub-record.
pub trait FieldName: Copy + Ord + fmt::Debug + 'static {
    /// Every field, in display order.
    const ALL: &'static [Self];

    /// The serialized (camelCase) name of the field.
    fn name(self) -> &'static str;
}

/// Something that can hand out the current value of each of its fields.
pub trait FieldSource<K: FieldName> {
    fn field_value(&self, field: K) -> FieldValue<'_>;
}

#[derive(Debug, Clone, Default)]
struct FieldState {
    rules: Vec<Rule>,
    errors: Vec<FieldError>,
}

/// Rule sets and error state keyed by field name.
#[derive(Debug, Clone)]
pub struct FieldSet<K: FieldName> {
    fields: BTreeMap<K, FieldState>,
}

impl<K: FieldName> FieldSet<K> {
    /// A descriptor map with every field present and no rules.
    pub fn new() -> Self {
        Self {
            fields: K::ALL
                .iter()
                .map(|field| (*field, FieldState::default()))
                .collect(),
        }
    }

    /// Builder form of [`add_rule`](Self::add_rule).
    pub fn with_rule(mut self, field: K, rule: Rule) -> Self {
        self.add_rule(field, rule);
        self
    }

    /// Attach a rule. Returns `false` if a rule of the same kind is already there.
    pub fn add_rule(&mut self, field: K, rule: Rule) -> bool {
        let state = self.fields.entry(field).or_default();
        if state.rules.iter().any(|r| r.kind() == rule.kind()) {
            return false;
        }
        state.rules.push(rule);
        true
    }

    /// Detach every rule of `kind`. Returns `true` if something was removed.
    pub fn remove_rule(&mut self, field: K, kind: RuleKind) -> bool {
        let state = self.fields.entry(field).or_default();
        let before = state.rules.len();
        state.rules.retain(|r| r.kind() != kind);
        state.rules.len() != before
    }

    pub fn has_rule(&self, field: K, kind: RuleKind) -> bool {
        self.rules(field).iter().any(|r| r.kind() == kind)
    }

    pub fn rules(&self, field: K) -> &[Rule] {
        self.fields
            .get(&field)
            .map(|state| state.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Re-run the field's current rules against `value` and store the errors.
    pub fn revalidate(&mut self, field: K, value: FieldValue<'_>) -> &[FieldError] {
        let state = self.fields.entry(field).or_default();
        state.errors = state
            .rules
            .iter()
            .filter_map(|rule| rule.check(value).err())
            .collect();
        &state.errors
    }

    /// Re-validate every field from `source`.
    pub fn revalidate_all<S: FieldSource<K>>(&mut self, source: &S) {
        for field in K::ALL {
            self.revalidate(*field, source.field_value(*field));
        }
    }

    /// Errors recorded by the last re-validation of `field`.
    pub fn errors(&self, field: K) -> &[FieldError] {
        self.fields
            .get(&field)
            .map(|state| state.errors.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_field_valid(&self, field: K) -> bool {
        self.errors(field).is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|state| state.errors.is_empty())
    }

    /// Fields that currently carry errors, in declaration order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = (K, &[FieldError])> + '_ {
        self.fields
            .iter()
            .filter(|(_, state)| !state.errors.is_empty())
            .map(|(field, state)| (*field, state.errors.as_slice()))
    }
}

impl<K: FieldName> Default for FieldSet<K> {
    fn default() -> Self {
        Self::new()
    }
}
