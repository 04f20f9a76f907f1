//! Contact model as stored by the contact store and edited by the form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of phone line.
///
/// The empty string is the "nothing picked yet" value a fresh entry starts with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Mobile,
    Work,
    Other,
}

impl PhoneType {
    /// Every selectable value, in display order.
    pub const OPTIONS: [PhoneType; 3] = [PhoneType::Mobile, PhoneType::Work, PhoneType::Other];

    /// The wire value (`""` for unspecified).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Mobile => "mobile",
            Self::Work => "work",
            Self::Other => "other",
        }
    }

    /// Human readable label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Mobile => "Mobile",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }
}

/// Kind of postal address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Home,
    Work,
    Other,
}

impl AddressType {
    /// Every selectable value, in display order.
    pub const OPTIONS: [AddressType; 3] =
        [AddressType::Home, AddressType::Work, AddressType::Other];

    /// The wire value (`""` for unspecified).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Home => "home",
            Self::Work => "work",
            Self::Other => "other",
        }
    }

    /// Human readable label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Home => "Home",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }
}

/// One phone line of a contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneEntry {
    pub phone_number: String,
    pub phone_type: PhoneType,
    /// Preferred lines must carry a number
    pub preferred: bool,
}

/// Postal address of a contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub address_type: AddressType,
}

/// A contact record.
///
/// This is the exact shape exchanged with the contact store. Missing keys
/// deserialize to their defaults so partially populated records still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// Unique identifier; empty for a contact that was never persisted
    pub id: String,

    /// Icon reference shown next to the contact
    pub icon: String,

    /// Personal (as opposed to business) contact
    pub personal: bool,

    pub first_name: String,

    pub last_name: String,

    /// Date of birth (`YYYY-MM-DD`)
    pub date_of_birth: Option<NaiveDate>,

    /// Position in the favorites list
    pub favorites_ranking: Option<i64>,

    /// Phone lines in display order
    pub phones: Vec<PhoneEntry>,

    pub address: Address,

    /// Free-text notes
    pub notes: String,
}

impl Contact {
    /// Create a contact with just an id and a first name.
    pub fn new(id: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            ..Default::default()
        }
    }

    /// Whether the contact has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// The first phone marked as preferred.
    pub fn preferred_phone(&self) -> Option<&PhoneEntry> {
        self.phones.iter().find(|p| p.preferred)
    }
}
