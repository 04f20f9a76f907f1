//! Phone entry unit: one repeatable `{number, type, preferred}` sub-record.
//!
//! The unit carries a single reactive rule. Whenever `preferred` changes to a
//! different value, the `required` rule on the phone number is added (when
//! preferred) or removed, and the number is re-validated immediately.

use super::change::DistinctChanges;
use super::field_set::{FieldName, FieldSet, FieldSource};
use crate::error::FieldError;
use crate::models::{PhoneEntry, PhoneType};
use crate::validation::{FieldValue, Rule, RuleKind};

/// Fields of a phone entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhoneField {
    PhoneNumber,
    PhoneType,
    Preferred,
}

impl FieldName for PhoneField {
    const ALL: &'static [Self] = &[
        PhoneField::PhoneNumber,
        PhoneField::PhoneType,
        PhoneField::Preferred,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::PhoneNumber => "phoneNumber",
            Self::PhoneType => "phoneType",
            Self::Preferred => "preferred",
        }
    }
}

impl FieldSource<PhoneField> for PhoneEntry {
    fn field_value(&self, field: PhoneField) -> FieldValue<'_> {
        match field {
            PhoneField::PhoneNumber => FieldValue::Text(&self.phone_number),
            PhoneField::PhoneType => FieldValue::Text(self.phone_type.as_str()),
            PhoneField::Preferred => FieldValue::Flag(self.preferred),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhoneEntryUnit {
    value: PhoneEntry,
    fields: FieldSet<PhoneField>,
    preferred_changes: DistinctChanges<bool>,
}

impl PhoneEntryUnit {
    /// A blank entry with the preferred-number rule installed.
    pub fn create() -> Self {
        let value = PhoneEntry::default();
        let mut fields = FieldSet::<PhoneField>::new();
        fields.revalidate_all(&value);

        Self {
            preferred_changes: DistinctChanges::seeded(value.preferred),
            value,
            fields,
        }
    }

    pub fn value(&self) -> &PhoneEntry {
        &self.value
    }

    pub fn set_phone_number(&mut self, number: impl Into<String>) {
        self.value.phone_number = number.into();
        self.revalidate(PhoneField::PhoneNumber);
    }

    pub fn set_phone_type(&mut self, phone_type: PhoneType) {
        self.value.phone_type = phone_type;
        self.revalidate(PhoneField::PhoneType);
    }

    /// Set `preferred`. Returns the new required-ness of the number if it changed.
    pub fn set_preferred(&mut self, preferred: bool) -> Option<bool> {
        self.value.preferred = preferred;
        self.revalidate(PhoneField::Preferred);
        self.react_to_preferred()
    }

    /// Assign the whole entry, then run the preferred rule.
    ///
    /// Returns the new required-ness of the number if it changed.
    pub fn set_value(&mut self, entry: PhoneEntry) -> Option<bool> {
        self.value = entry;
        self.fields.revalidate_all(&self.value);
        self.react_to_preferred()
    }

    /// Whether the phone number currently carries the required rule.
    pub fn is_number_required(&self) -> bool {
        self.fields
            .has_rule(PhoneField::PhoneNumber, RuleKind::Required)
    }

    pub fn errors(&self, field: PhoneField) -> &[FieldError] {
        self.fields.errors(field)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.is_valid()
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = (PhoneField, &[FieldError])> + '_ {
        self.fields.invalid_fields()
    }

    fn react_to_preferred(&mut self) -> Option<bool> {
        let preferred = self.value.preferred;
        if !self.preferred_changes.observe(&preferred) {
            return None;
        }

        if preferred {
            self.fields.add_rule(PhoneField::PhoneNumber, Rule::Required);
        } else {
            self.fields
                .remove_rule(PhoneField::PhoneNumber, RuleKind::Required);
        }
        self.revalidate(PhoneField::PhoneNumber);

        tracing::debug!(
            required = preferred,
            "Phone number requirement toggled by preferred flag"
        );
        Some(preferred)
    }

    fn revalidate(&mut self, field: PhoneField) {
        self.fields.revalidate(field, self.value.field_value(field));
    }
}

impl Default for PhoneEntryUnit {
    fn default() -> Self {
        Self::create()
    }
}
