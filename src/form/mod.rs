//! The contact edit form.
//!
//! - **field_set**: per-field rule sets and error state
//! - **change** / **debounce**: distinct-change detection and the settling timer
//! - **events**: listener registration for form events
//! - **phone** / **address**: the two reactive sub-records
//! - **contact_form**: the aggregate that owns them

pub mod address;
pub mod change;
pub mod contact_form;
pub mod debounce;
pub mod events;
pub mod field_set;
pub mod phone;

pub use address::{AddressField, AddressState, AddressUnit, DEFAULT_SETTLE_WINDOW};
pub use change::DistinctChanges;
pub use contact_form::{ContactField, ContactForm, FieldEdit, FieldStatus, FormSettings};
pub use debounce::Debouncer;
pub use events::{EventBus, FormEvent, SubscriptionId};
pub use field_set::{FieldName, FieldSet, FieldSource};
pub use phone::{PhoneEntryUnit, PhoneField};
