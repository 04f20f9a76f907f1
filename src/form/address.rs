//! Address unit.
//!
//! Every address field is required once input has settled. While the user is
//! typing, the requirement is suspended so partially entered addresses don't
//! flash errors:
//!
//! ```text
//!   Enforcing --distinct change--> Relaxed --distinct change--> Relaxed (window restarts)
//!       ^                             |
//!       +------ window elapsed -------+
//! ```
//!
//! The relaxation happens synchronously inside the edit, before the settling
//! deadline for that same edit is scheduled.

use super::change::DistinctChanges;
use super::debounce::Debouncer;
use super::field_set::{FieldName, FieldSet, FieldSource};
use crate::error::FieldError;
use crate::models::{Address, AddressType};
use crate::validation::{FieldValue, Rule, RuleKind};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Default quiet period before required rules come back.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(2000);

/// Fields of the address sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    StreetAddress,
    City,
    State,
    PostalCode,
    AddressType,
}

impl FieldName for AddressField {
    const ALL: &'static [Self] = &[
        AddressField::StreetAddress,
        AddressField::City,
        AddressField::State,
        AddressField::PostalCode,
        AddressField::AddressType,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::StreetAddress => "streetAddress",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::AddressType => "addressType",
        }
    }
}

impl FieldSource<AddressField> for Address {
    fn field_value(&self, field: AddressField) -> FieldValue<'_> {
        match field {
            AddressField::StreetAddress => FieldValue::Text(&self.street_address),
            AddressField::City => FieldValue::Text(&self.city),
            AddressField::State => FieldValue::Text(&self.state),
            AddressField::PostalCode => FieldValue::Text(&self.postal_code),
            AddressField::AddressType => FieldValue::Text(self.address_type.as_str()),
        }
    }
}

/// Whether the address currently requires its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressState {
    Enforcing,
    Relaxed,
}

#[derive(Debug, Clone)]
pub struct AddressUnit {
    value: Address,
    fields: FieldSet<AddressField>,
    state: AddressState,
    changes: DistinctChanges<Address>,
    settle: Debouncer,
    tracking: bool,
}

impl AddressUnit {
    /// An empty address in the Enforcing state; tracking not started.
    pub fn new(settle_window: Duration) -> Self {
        let value = Address::default();
        let mut fields = FieldSet::new();
        for field in AddressField::ALL {
            fields.add_rule(*field, Rule::Required);
        }
        fields.revalidate_all(&value);

        Self {
            changes: DistinctChanges::seeded(value.clone()),
            value,
            fields,
            state: AddressState::Enforcing,
            settle: Debouncer::new(settle_window),
            tracking: false,
        }
    }

    /// Begin reacting to edits. Returns `false` if tracking was already on.
    pub fn start_tracking(&mut self) -> bool {
        if self.tracking {
            tracing::warn!("Address change tracking already started");
            return false;
        }
        self.changes.reset(self.value.clone());
        self.tracking = true;
        tracing::debug!(window = ?self.settle.window(), "Address change tracking started");
        true
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn value(&self) -> &Address {
        &self.value
    }

    pub fn state(&self) -> AddressState {
        self.state
    }

    /// Set one of the four text fields.
    ///
    /// Returns the state entered because of this edit, if any.
    pub fn set_text(
        &mut self,
        field: AddressField,
        text: impl Into<String>,
        now: Instant,
    ) -> Option<AddressState> {
        let text = text.into();
        match field {
            AddressField::StreetAddress => self.value.street_address = text,
            AddressField::City => self.value.city = text,
            AddressField::State => self.value.state = text,
            AddressField::PostalCode => self.value.postal_code = text,
            AddressField::AddressType => {
                tracing::warn!("Address type is not a text field; edit ignored");
                return None;
            }
        }
        self.fields.revalidate(field, self.value.field_value(field));
        self.value_changed(now)
    }

    pub fn set_address_type(
        &mut self,
        address_type: AddressType,
        now: Instant,
    ) -> Option<AddressState> {
        self.value.address_type = address_type;
        self.fields.revalidate(
            AddressField::AddressType,
            self.value.field_value(AddressField::AddressType),
        );
        self.value_changed(now)
    }

    /// Assign the whole address as a single change.
    pub fn set_value(&mut self, address: Address, now: Instant) -> Option<AddressState> {
        self.value = address;
        self.fields.revalidate_all(&self.value);
        self.value_changed(now)
    }

    /// Fire the settling window if it has elapsed.
    ///
    /// Returns `Some(Enforcing)` when required rules were reinstated.
    pub fn poll(&mut self, now: Instant) -> Option<AddressState> {
        if !self.settle.fire_if_due(now) {
            return None;
        }
        self.enforce();
        Some(AddressState::Enforcing)
    }

    /// When the pending settling window elapses, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }

    pub fn is_required(&self, field: AddressField) -> bool {
        self.fields.has_rule(field, RuleKind::Required)
    }

    pub fn errors(&self, field: AddressField) -> &[FieldError] {
        self.fields.errors(field)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.is_valid()
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = (AddressField, &[FieldError])> + '_ {
        self.fields.invalid_fields()
    }

    fn value_changed(&mut self, now: Instant) -> Option<AddressState> {
        if !self.tracking || !self.changes.observe(&self.value) {
            return None;
        }

        let entered = if self.state == AddressState::Enforcing {
            self.relax();
            Some(AddressState::Relaxed)
        } else {
            None
        };
        self.settle.schedule(now);
        entered
    }

    fn relax(&mut self) {
        for field in AddressField::ALL {
            self.fields.remove_rule(*field, RuleKind::Required);
        }
        self.fields.revalidate_all(&self.value);
        self.state = AddressState::Relaxed;
        tracing::debug!("Address relaxed: required rules suspended");
    }

    fn enforce(&mut self) {
        for field in AddressField::ALL {
            self.fields.add_rule(*field, Rule::Required);
        }
        self.fields.revalidate_all(&self.value);
        self.state = AddressState::Enforcing;
        tracing::debug!(
            invalid = self.fields.invalid_fields().count(),
            "Address settled: required rules reinstated"
        );
    }
}

impl Default for AddressUnit {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_WINDOW)
    }
}
