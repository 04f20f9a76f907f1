//! Contact Form - a validated edit form for a single contact record.
//!
//! The form wires identity fields, a list of phone entries and one postal
//! address to a small set of validation rules, two of which react to user
//! input: a preferred phone must have a number, and address fields stop
//! being required while the user is typing and become required again once
//! input has settled.
//!
//! # Architecture
//!
//! - **validation**: pure rules (`required`, `min_length`, word `blacklist`)
//! - **form**: field descriptor maps, the phone/address units and the aggregate
//! - **services**: the editor that loads and saves through the collaborators
//! - **repositories**: the contact store trait with in-memory and HTTP stores
//! - **client**: blocking HTTP client used by the HTTP store
//! - **navigation**: navigator and route parameter collaborators
//! - **models** / **domain**: the contact record and validated identifiers
//! - **error** / **config**: error types and environment configuration

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod models;
pub mod navigation;
pub mod repositories;
pub mod services;
pub mod validation;

pub use client::ContactsClient;
pub use config::Config;
pub use domain::ContactId;
pub use error::{ConfigError, EditorError, FieldError, FormError, StoreError};
pub use form::{
    AddressState, ContactForm, FieldEdit, FieldStatus, FormEvent, FormSettings, PhoneEntryUnit,
};
pub use models::{Address, AddressType, Contact, PhoneEntry, PhoneType};
pub use navigation::{Navigator, RouteParameterSource, RouteParams, TracingNavigator};
pub use repositories::{ContactStore, HttpContactStore, InMemoryContactStore};
pub use services::{ContactEditor, EditMode};
