//! Phone entries: a number is mandatory exactly while the entry is preferred.

use contact_form::error::{FieldError, FormError};
use contact_form::form::{ContactForm, FieldEdit, FormEvent, FormSettings, PhoneField};
use contact_form::models::{Contact, PhoneEntry, PhoneType};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

fn form() -> ContactForm {
    ContactForm::new(&FormSettings::default())
}

#[test]
fn test_new_form_has_one_optional_phone() {
    let form = form();

    assert_eq!(form.phone_count(), 1);
    let phone = form.phone(0).unwrap();
    assert!(!phone.is_number_required());
    assert!(phone.is_valid());
    assert_eq!(phone.value(), &PhoneEntry::default());
}

#[test]
fn test_preferring_blank_phone_makes_it_invalid() {
    let mut form = form();
    let now = Instant::now();

    form.apply(
        FieldEdit::Preferred {
            index: 0,
            preferred: true,
        },
        now,
    )
    .unwrap();

    let phone = form.phone(0).unwrap();
    assert!(phone.is_number_required());
    assert_eq!(
        phone.errors(PhoneField::PhoneNumber),
        &[FieldError::MissingValue]
    );
    assert!(form
        .validation_summary()
        .contains_key("phones.0.phoneNumber"));
}

#[test]
fn test_typing_number_clears_requirement_error() {
    let mut form = form();
    let now = Instant::now();
    form.apply(
        FieldEdit::Preferred {
            index: 0,
            preferred: true,
        },
        now,
    )
    .unwrap();

    form.apply(
        FieldEdit::PhoneNumber {
            index: 0,
            number: "555-0100".to_string(),
        },
        now,
    )
    .unwrap();

    assert!(form.phone(0).unwrap().is_valid());
}

#[test]
fn test_unpreferring_drops_requirement() {
    let mut form = form();
    let now = Instant::now();
    for preferred in [true, false] {
        form.apply(FieldEdit::Preferred { index: 0, preferred }, now)
            .unwrap();
    }

    let phone = form.phone(0).unwrap();
    assert!(!phone.is_number_required());
    assert!(phone.errors(PhoneField::PhoneNumber).is_empty());
}

#[test]
fn test_entries_react_independently() {
    let mut form = form();
    let now = Instant::now();
    let second = form.add_phone();
    assert_eq!(second, 1);

    form.apply(
        FieldEdit::Preferred {
            index: 1,
            preferred: true,
        },
        now,
    )
    .unwrap();

    assert!(!form.phone(0).unwrap().is_number_required());
    assert!(form.phone(1).unwrap().is_number_required());
}

#[test]
fn test_repeating_same_preferred_value_emits_once() {
    let mut form = form();
    let now = Instant::now();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    form.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    for _ in 0..3 {
        form.apply(
            FieldEdit::Preferred {
                index: 0,
                preferred: true,
            },
            now,
        )
        .unwrap();
    }

    assert_eq!(
        *seen.lock().unwrap(),
        vec![FormEvent::PhoneRequirementChanged {
            index: 0,
            required: true
        }]
    );
}

#[test]
fn test_edit_for_missing_phone_is_rejected() {
    let mut form = form();

    let result = form.apply(
        FieldEdit::PhoneType {
            index: 3,
            phone_type: PhoneType::Work,
        },
        Instant::now(),
    );

    assert_eq!(result, Err(FormError::NoSuchPhone { index: 3, len: 1 }));
}

#[test]
fn test_loaded_phones_keep_their_order_and_flags() {
    let mut form = form();
    let mut contact = Contact::new("9", "Grace");
    contact.phones = vec![
        PhoneEntry {
            phone_number: "555-0001".to_string(),
            phone_type: PhoneType::Mobile,
            preferred: false,
        },
        PhoneEntry {
            phone_number: String::new(),
            phone_type: PhoneType::Other,
            preferred: true,
        },
    ];

    assert!(form.apply_loaded(Some(contact.clone()), Instant::now()));

    assert_eq!(form.phone_count(), 2);
    assert_eq!(form.raw_value().phones, contact.phones);
    assert!(form.phone(1).unwrap().is_number_required());
    assert!(!form.phone(1).unwrap().is_valid());
}

#[test]
fn test_loading_fewer_phones_blanks_the_rest() {
    let mut form = form();
    form.add_phone();
    form.add_phone();
    let mut contact = Contact::new("9", "Grace");
    contact.phones = vec![PhoneEntry {
        phone_number: "555-0001".to_string(),
        phone_type: PhoneType::Work,
        preferred: true,
    }];

    form.apply_loaded(Some(contact), Instant::now());

    assert_eq!(form.phone_count(), 3);
    assert_eq!(form.phone(2).unwrap().value(), &PhoneEntry::default());
    assert!(!form.phone(2).unwrap().is_number_required());
}
