//! The contact form aggregate.
//!
//! Composes the identity fields, an ordered list of [`PhoneEntryUnit`]s, one
//! [`AddressUnit`] and the notes field. The aggregate is purely synchronous:
//! edits, bulk assignment and timer polling each complete within one call.

use super::address::{AddressField, AddressState, AddressUnit, DEFAULT_SETTLE_WINDOW};
use super::events::{EventBus, FormEvent, SubscriptionId};
use super::field_set::{FieldName, FieldSet, FieldSource};
use super::phone::PhoneEntryUnit;
use crate::config::Config;
use crate::error::{ConfigError, ConfigResult, FieldError, FormError};
use crate::models::{AddressType, Contact, PhoneEntry, PhoneType};
use crate::validation::{Blacklist, FieldValue, Rule, DEFAULT_NOTES_BLACKLIST};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// Tunables of the form's validation behavior.
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub first_name_min_length: usize,
    pub notes_blacklist: Blacklist,
    pub address_settle_window: Duration,
}

impl FormSettings {
    /// Build settings from configuration, compiling the notes word list.
    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        let notes_blacklist =
            Blacklist::new(config.notes_blacklist.iter().cloned()).map_err(|e| {
                ConfigError::InvalidValue {
                    var: "NOTES_BLACKLIST".to_string(),
                    reason: e.to_string(),
                }
            })?;

        Ok(Self {
            first_name_min_length: config.first_name_min_length,
            notes_blacklist,
            address_settle_window: Duration::from_millis(config.address_settle_ms),
        })
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            first_name_min_length: 3,
            notes_blacklist: DEFAULT_NOTES_BLACKLIST.clone(),
            address_settle_window: DEFAULT_SETTLE_WINDOW,
        }
    }
}

/// Top-level (non-phone, non-address) fields of the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Id,
    Icon,
    Personal,
    FirstName,
    LastName,
    DateOfBirth,
    FavoritesRanking,
    Notes,
}

impl FieldName for ContactField {
    const ALL: &'static [Self] = &[
        ContactField::Id,
        ContactField::Icon,
        ContactField::Personal,
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::DateOfBirth,
        ContactField::FavoritesRanking,
        ContactField::Notes,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Icon => "icon",
            Self::Personal => "personal",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::DateOfBirth => "dateOfBirth",
            Self::FavoritesRanking => "favoritesRanking",
            Self::Notes => "notes",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Identity {
    id: String,
    icon: String,
    personal: bool,
    first_name: String,
    last_name: String,
    date_of_birth: Option<NaiveDate>,
    favorites_ranking: Option<i64>,
    notes: String,
}

impl Identity {
    fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            icon: contact.icon.clone(),
            personal: contact.personal,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            date_of_birth: contact.date_of_birth,
            favorites_ranking: contact.favorites_ranking,
            notes: contact.notes.clone(),
        }
    }
}

impl FieldSource<ContactField> for Identity {
    fn field_value(&self, field: ContactField) -> FieldValue<'_> {
        match field {
            ContactField::Id => FieldValue::Text(&self.id),
            ContactField::Icon => FieldValue::Text(&self.icon),
            ContactField::Personal => FieldValue::Flag(self.personal),
            ContactField::FirstName => FieldValue::Text(&self.first_name),
            ContactField::LastName => FieldValue::Text(&self.last_name),
            ContactField::DateOfBirth => FieldValue::Date(self.date_of_birth),
            ContactField::FavoritesRanking => FieldValue::Number(self.favorites_ranking),
            ContactField::Notes => FieldValue::Text(&self.notes),
        }
    }
}

/// One user edit, addressed by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldEdit {
    Icon(String),
    Personal(bool),
    FirstName(String),
    LastName(String),
    DateOfBirth(Option<NaiveDate>),
    FavoritesRanking(Option<i64>),
    Notes(String),
    PhoneNumber { index: usize, number: String },
    PhoneType {
        index: usize,
        #[serde(rename = "phoneType")]
        phone_type: PhoneType,
    },
    Preferred { index: usize, preferred: bool },
    StreetAddress(String),
    City(String),
    State(String),
    PostalCode(String),
    AddressType(AddressType),
}

/// Read view of a single identity field for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStatus<'a> {
    pub value: &'a str,
    pub errors: &'a [FieldError],
}

impl FieldStatus<'_> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The contact form.
#[derive(Debug)]
pub struct ContactForm {
    identity: Identity,
    fields: FieldSet<ContactField>,
    phones: Vec<PhoneEntryUnit>,
    address: AddressUnit,
    events: EventBus,
}

impl ContactForm {
    /// Create-mode defaults: one blank phone entry and an Enforcing address.
    pub fn new(settings: &FormSettings) -> Self {
        let identity = Identity::default();
        let mut fields = FieldSet::new()
            .with_rule(ContactField::FirstName, Rule::Required)
            .with_rule(
                ContactField::FirstName,
                Rule::MinLength(settings.first_name_min_length),
            )
            .with_rule(
                ContactField::Notes,
                Rule::Blacklist(settings.notes_blacklist.clone()),
            );
        fields.revalidate_all(&identity);

        Self {
            identity,
            fields,
            phones: vec![PhoneEntryUnit::create()],
            address: AddressUnit::new(settings.address_settle_window),
            events: EventBus::new(),
        }
    }

    // ========================= Structure =========================

    /// Append a blank phone entry. Returns its index.
    pub fn add_phone(&mut self) -> usize {
        self.phones.push(PhoneEntryUnit::create());
        let index = self.phones.len() - 1;
        self.events.emit(FormEvent::PhoneAdded { index });
        index
    }

    pub fn phone_count(&self) -> usize {
        self.phones.len()
    }

    pub fn phone(&self, index: usize) -> Option<&PhoneEntryUnit> {
        self.phones.get(index)
    }

    pub fn phones(&self) -> &[PhoneEntryUnit] {
        &self.phones
    }

    pub fn address(&self) -> &AddressUnit {
        &self.address
    }

    // ========================= Edits =========================

    /// Apply one user edit at `now`.
    ///
    /// A settling window that elapsed before `now` fires first.
    pub fn apply(&mut self, edit: FieldEdit, now: Instant) -> Result<(), FormError> {
        self.poll_timers(now);
        match edit {
            FieldEdit::Icon(icon) => {
                self.identity.icon = icon;
                self.revalidate(ContactField::Icon);
            }
            FieldEdit::Personal(personal) => {
                self.identity.personal = personal;
                self.revalidate(ContactField::Personal);
            }
            FieldEdit::FirstName(name) => {
                self.identity.first_name = name;
                self.revalidate(ContactField::FirstName);
            }
            FieldEdit::LastName(name) => {
                self.identity.last_name = name;
                self.revalidate(ContactField::LastName);
            }
            FieldEdit::DateOfBirth(date) => {
                self.identity.date_of_birth = date;
                self.revalidate(ContactField::DateOfBirth);
            }
            FieldEdit::FavoritesRanking(ranking) => {
                self.identity.favorites_ranking = ranking;
                self.revalidate(ContactField::FavoritesRanking);
            }
            FieldEdit::Notes(notes) => {
                self.identity.notes = notes;
                self.revalidate(ContactField::Notes);
            }
            FieldEdit::PhoneNumber { index, number } => {
                self.phone_mut(index)?.set_phone_number(number);
            }
            FieldEdit::PhoneType { index, phone_type } => {
                self.phone_mut(index)?.set_phone_type(phone_type);
            }
            FieldEdit::Preferred { index, preferred } => {
                if let Some(required) = self.phone_mut(index)?.set_preferred(preferred) {
                    self.events
                        .emit(FormEvent::PhoneRequirementChanged { index, required });
                }
            }
            FieldEdit::StreetAddress(text) => {
                self.edit_address_text(AddressField::StreetAddress, text, now)
            }
            FieldEdit::City(text) => self.edit_address_text(AddressField::City, text, now),
            FieldEdit::State(text) => self.edit_address_text(AddressField::State, text, now),
            FieldEdit::PostalCode(text) => {
                self.edit_address_text(AddressField::PostalCode, text, now)
            }
            FieldEdit::AddressType(address_type) => {
                let entered = self.address.set_address_type(address_type, now);
                self.emit_address_transition(entered);
            }
        }
        Ok(())
    }

    /// Assign a stored contact.
    ///
    /// The phone list is first grown to the record's phone count (never
    /// shrunk), then every value is assigned in this same call. Surplus
    /// phone units are reset to blank entries. `None` leaves the form as is.
    pub fn apply_loaded(&mut self, contact: Option<Contact>, now: Instant) -> bool {
        let Some(contact) = contact else {
            return false;
        };
        self.poll_timers(now);

        while self.phones.len() < contact.phones.len() {
            self.add_phone();
        }

        self.identity = Identity::from_contact(&contact);
        self.fields.revalidate_all(&self.identity);

        let mut entries = contact.phones.into_iter();
        let mut toggled = Vec::new();
        for (index, unit) in self.phones.iter_mut().enumerate() {
            let entry = entries.next().unwrap_or_default();
            if let Some(required) = unit.set_value(entry) {
                toggled.push(FormEvent::PhoneRequirementChanged { index, required });
            }
        }

        let entered = self.address.set_value(contact.address, now);

        for event in toggled {
            self.events.emit(event);
        }
        self.emit_address_transition(entered);
        self.events.emit(FormEvent::ValuesLoaded {
            phone_count: self.phones.len(),
        });

        tracing::debug!(
            id = %self.identity.id,
            phones = self.phones.len(),
            "Contact values assigned to form"
        );
        true
    }

    // ========================= Address timing =========================

    /// Begin the address relax/enforce cycle. Returns `false` if already started.
    pub fn start_address_tracking(&mut self) -> bool {
        self.address.start_tracking()
    }

    /// Fire any timer that has elapsed by `now`.
    pub fn poll_timers(&mut self, now: Instant) -> Option<AddressState> {
        let entered = self.address.poll(now);
        self.emit_address_transition(entered);
        entered
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.address.next_deadline()
    }

    // ========================= Values & validity =========================

    /// The complete current value, including fields not currently required.
    pub fn raw_value(&self) -> Contact {
        Contact {
            id: self.identity.id.clone(),
            icon: self.identity.icon.clone(),
            personal: self.identity.personal,
            first_name: self.identity.first_name.clone(),
            last_name: self.identity.last_name.clone(),
            date_of_birth: self.identity.date_of_birth,
            favorites_ranking: self.identity.favorites_ranking,
            phones: self
                .phones
                .iter()
                .map(|unit| unit.value().clone())
                .collect::<Vec<PhoneEntry>>(),
            address: self.address.value().clone(),
            notes: self.identity.notes.clone(),
        }
    }

    pub fn first_name(&self) -> FieldStatus<'_> {
        self.status(ContactField::FirstName)
    }

    pub fn notes(&self) -> FieldStatus<'_> {
        self.status(ContactField::Notes)
    }

    pub fn errors(&self, field: ContactField) -> &[FieldError] {
        self.fields.errors(field)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.is_valid()
            && self.phones.iter().all(PhoneEntryUnit::is_valid)
            && self.address.is_valid()
    }

    /// Every invalid field keyed by its dotted path (`phones.1.phoneNumber`).
    pub fn validation_summary(&self) -> BTreeMap<String, Vec<FieldError>> {
        let mut summary = BTreeMap::new();

        for (field, errors) in self.fields.invalid_fields() {
            summary.insert(field.name().to_string(), errors.to_vec());
        }
        for (index, unit) in self.phones.iter().enumerate() {
            for (field, errors) in unit.invalid_fields() {
                summary.insert(format!("phones.{}.{}", index, field.name()), errors.to_vec());
            }
        }
        for (field, errors) in self.address.invalid_fields() {
            summary.insert(format!("address.{}", field.name()), errors.to_vec());
        }

        summary
    }

    // ========================= Events =========================

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FormEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn status(&self, field: ContactField) -> FieldStatus<'_> {
        FieldStatus {
            value: self.identity.field_value(field).as_text().unwrap_or(""),
            errors: self.fields.errors(field),
        }
    }

    fn revalidate(&mut self, field: ContactField) {
        self.fields
            .revalidate(field, self.identity.field_value(field));
    }

    fn phone_mut(&mut self, index: usize) -> Result<&mut PhoneEntryUnit, FormError> {
        let len = self.phones.len();
        self.phones
            .get_mut(index)
            .ok_or(FormError::NoSuchPhone { index, len })
    }

    fn edit_address_text(&mut self, field: AddressField, text: String, now: Instant) {
        let entered = self.address.set_text(field, text, now);
        self.emit_address_transition(entered);
    }

    fn emit_address_transition(&mut self, entered: Option<AddressState>) {
        match entered {
            Some(AddressState::Relaxed) => self.events.emit(FormEvent::AddressRelaxed),
            Some(AddressState::Enforcing) => self.events.emit(FormEvent::AddressEnforced),
            None => {}
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(&FormSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;
    use std::sync::{Arc, Mutex};

    fn loaded_contact(phone_count: usize) -> Contact {
        Contact {
            id: "7".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            phones: (0..phone_count)
                .map(|i| PhoneEntry {
                    phone_number: format!("555-010{}", i),
                    phone_type: PhoneType::Mobile,
                    preferred: i == 0,
                })
                .collect(),
            address: Address {
                street_address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                postal_code: "62701".to_string(),
                address_type: AddressType::Home,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = ContactForm::default();
        assert_eq!(form.phone_count(), 1);
        assert_eq!(form.address().state(), AddressState::Enforcing);
        assert_eq!(form.first_name().errors, &[FieldError::MissingValue]);
        assert!(form.notes().is_valid());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_first_name_rules() {
        let mut form = ContactForm::default();
        let now = Instant::now();

        form.apply(FieldEdit::FirstName("Al".to_string()), now).unwrap();
        assert_eq!(
            form.first_name().errors,
            &[FieldError::TooShort { min: 3, actual: 2 }]
        );

        form.apply(FieldEdit::FirstName("Ana".to_string()), now).unwrap();
        assert!(form.first_name().is_valid());
        assert_eq!(form.first_name().value, "Ana");
    }

    #[test]
    fn test_notes_blacklist() {
        let mut form = ContactForm::default();
        let now = Instant::now();

        form.apply(FieldEdit::Notes("likes bar trivia".to_string()), now)
            .unwrap();
        assert_eq!(
            form.notes().errors,
            &[FieldError::ForbiddenWord {
                words: vec!["bar".to_string()]
            }]
        );

        form.apply(FieldEdit::Notes("hello world".to_string()), now)
            .unwrap();
        assert!(form.notes().is_valid());
    }

    #[test]
    fn test_edit_unknown_phone_fails() {
        let mut form = ContactForm::default();
        let result = form.apply(
            FieldEdit::Preferred {
                index: 3,
                preferred: true,
            },
            Instant::now(),
        );
        assert_eq!(result, Err(FormError::NoSuchPhone { index: 3, len: 1 }));
    }

    #[test]
    fn test_add_phone_leaves_siblings_alone() {
        let mut form = ContactForm::default();
        let now = Instant::now();
        form.apply(
            FieldEdit::Preferred {
                index: 0,
                preferred: true,
            },
            now,
        )
        .unwrap();

        assert_eq!(form.add_phone(), 1);
        assert!(form.phone(0).unwrap().is_number_required());
        assert!(!form.phone(1).unwrap().is_number_required());
        assert!(form.validation_summary().contains_key("phones.0.phoneNumber"));
    }

    #[test]
    fn test_apply_loaded_grows_then_assigns() {
        let mut form = ContactForm::default();
        assert!(form.apply_loaded(Some(loaded_contact(3)), Instant::now()));

        assert_eq!(form.phone_count(), 3);
        assert_eq!(form.raw_value(), loaded_contact(3));
        assert!(form.phone(0).unwrap().is_number_required());
        assert!(form.is_valid());
    }

    #[test]
    fn test_apply_loaded_none_keeps_defaults() {
        let mut form = ContactForm::default();
        assert!(!form.apply_loaded(None, Instant::now()));
        assert_eq!(form.phone_count(), 1);
        assert_eq!(form.raw_value().first_name, "");
    }

    #[test]
    fn test_apply_loaded_never_shrinks() {
        let mut form = ContactForm::default();
        form.add_phone();
        form.apply(
            FieldEdit::PhoneNumber {
                index: 1,
                number: "stale".to_string(),
            },
            Instant::now(),
        )
        .unwrap();

        form.apply_loaded(Some(loaded_contact(1)), Instant::now());
        assert_eq!(form.phone_count(), 2);
        assert_eq!(form.phone(1).unwrap().value(), &PhoneEntry::default());
    }

    #[test]
    fn test_load_emits_events_once_values_are_in_place() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut form = ContactForm::default();
        let sink = seen.clone();
        form.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        form.apply_loaded(Some(loaded_contact(2)), Instant::now());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                FormEvent::PhoneAdded { index: 1 },
                FormEvent::PhoneRequirementChanged {
                    index: 0,
                    required: true
                },
                FormEvent::ValuesLoaded { phone_count: 2 },
            ]
        );
    }

    #[test]
    fn test_raw_value_includes_relaxed_blank_address() {
        let mut form = ContactForm::default();
        form.start_address_tracking();
        let now = Instant::now();
        form.apply(FieldEdit::City("Paris".to_string()), now).unwrap();

        assert_eq!(form.address().state(), AddressState::Relaxed);
        let raw = form.raw_value();
        assert_eq!(raw.address.city, "Paris");
        assert_eq!(raw.address.street_address, "");
    }

    #[test]
    fn test_poll_timers_emits_enforced() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut form = ContactForm::default();
        let sink = seen.clone();
        form.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        form.start_address_tracking();

        let now = Instant::now();
        form.apply(FieldEdit::PostalCode("6".to_string()), now).unwrap();
        let deadline = form.next_deadline().unwrap();
        assert_eq!(form.poll_timers(deadline), Some(AddressState::Enforcing));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![FormEvent::AddressRelaxed, FormEvent::AddressEnforced]
        );
        assert!(form.validation_summary().contains_key("address.city"));
    }

    #[test]
    fn test_overdue_window_fires_before_next_edit() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut form = ContactForm::default();
        let sink = seen.clone();
        form.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        form.start_address_tracking();

        let start = Instant::now();
        form.apply(FieldEdit::City("Rome".to_string()), start).unwrap();
        let late = start + Duration::from_millis(3000);
        form.apply(FieldEdit::City("Roma".to_string()), late).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                FormEvent::AddressRelaxed,
                FormEvent::AddressEnforced,
                FormEvent::AddressRelaxed
            ]
        );
        assert_eq!(
            form.next_deadline(),
            Some(late + DEFAULT_SETTLE_WINDOW)
        );
    }

    #[test]
    fn test_field_edit_json() {
        let edit: FieldEdit =
            serde_json::from_str(r#"{"field": "firstName", "value": "Ana"}"#).unwrap();
        assert_eq!(edit, FieldEdit::FirstName("Ana".to_string()));

        let edit: FieldEdit = serde_json::from_str(
            r#"{"field": "preferred", "value": {"index": 0, "preferred": true}}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            FieldEdit::Preferred {
                index: 0,
                preferred: true
            }
        );
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            first_name_min_length: 5,
            notes_blacklist: vec!["baz".to_string()],
            address_settle_ms: 10,
            ..Config::default()
        };
        let settings = FormSettings::from_config(&config).unwrap();
        assert_eq!(settings.first_name_min_length, 5);
        assert_eq!(settings.notes_blacklist.words(), &["baz".to_string()]);
        assert_eq!(settings.address_settle_window, Duration::from_millis(10));
    }
}
