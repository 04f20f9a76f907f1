//! Data models for the contact record.
//!
//! This module contains the serializable shape of a contact as exchanged with
//! the contact store.

pub mod contact;

pub use contact::{Address, AddressType, Contact, PhoneEntry, PhoneType};
