//! Plain-record entities for both apps.
//!
//! Serde field names match the persisted JSON documents byte for byte so the
//! store keys stay compatible with previously saved data.

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Admin entities
// ---------------------------------------------------------------------------

/// Account role on the admin side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Renter,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Renter, Role::Admin];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Renter => "renter",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Result<Self, StoreError> {
        match value.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "renter" => Ok(Role::Renter),
            "admin" => Ok(Role::Admin),
            other => Err(StoreError::Validation(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub price: i64,
    pub location: String,
    pub active: bool,
}

/// Payment state of an admin booking. Transitions are unguarded overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Paid,
    #[serde(rename = "Not Paid")]
    NotPaid,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Paid,
        BookingStatus::NotPaid,
        BookingStatus::Cancelled,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Paid => "Paid",
            BookingStatus::NotPaid => "Not Paid",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self, StoreError> {
        match value.trim().to_lowercase().as_str() {
            "paid" => Ok(BookingStatus::Paid),
            "not paid" => Ok(BookingStatus::NotPaid),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(StoreError::Validation(format!(
                "unknown booking status: {other}"
            ))),
        }
    }

    /// Revenue counts any status whose text contains "paid", case-insensitive.
    /// That makes "Not Paid" count too, a loose policy the stats keep as-is.
    #[must_use]
    pub fn counts_as_paid(self) -> bool {
        self.as_str().to_lowercase().contains("paid")
    }
}

/// An admin booking. `item` and `user` are title/email strings, not ids:
/// duplicate titles collide on join, a known gap kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u32,
    pub item: String,
    pub user: String,
    pub start: String,
    pub end: String,
    pub qty: u32,
    pub status: BookingStatus,
}

/// One line of the admin activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 timestamp.
    pub t: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The four admin toggles, each persisted under its own boolean key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Maintenance,
    AllowGuest,
    EmailNotifs,
    Reviews,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Maintenance,
        SettingKey::AllowGuest,
        SettingKey::EmailNotifs,
        SettingKey::Reviews,
    ];

    /// Persistence key, preserved verbatim for stored-data compatibility.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            SettingKey::Maintenance => "setting-maintenance",
            SettingKey::AllowGuest => "setting-allow-guest",
            SettingKey::EmailNotifs => "setting-email-notifs",
            SettingKey::Reviews => "setting-reviews",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SettingKey::Maintenance => "Maintenance mode",
            SettingKey::AllowGuest => "Allow guest browsing",
            SettingKey::EmailNotifs => "Email notifications",
            SettingKey::Reviews => "Reviews enabled",
        }
    }

    #[must_use]
    pub fn default_value(self) -> bool {
        match self {
            SettingKey::Maintenance | SettingKey::EmailNotifs => false,
            SettingKey::AllowGuest | SettingKey::Reviews => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub maintenance: bool,
    pub allow_guest: bool,
    pub email_notifs: bool,
    pub reviews_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maintenance: SettingKey::Maintenance.default_value(),
            allow_guest: SettingKey::AllowGuest.default_value(),
            email_notifs: SettingKey::EmailNotifs.default_value(),
            reviews_enabled: SettingKey::Reviews.default_value(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Maintenance => self.maintenance,
            SettingKey::AllowGuest => self.allow_guest,
            SettingKey::EmailNotifs => self.email_notifs,
            SettingKey::Reviews => self.reviews_enabled,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::Maintenance => self.maintenance = value,
            SettingKey::AllowGuest => self.allow_guest = value,
            SettingKey::EmailNotifs => self.email_notifs = value,
            SettingKey::Reviews => self.reviews_enabled = value,
        }
    }
}

// ---------------------------------------------------------------------------
// Marketplace entities
// ---------------------------------------------------------------------------

/// Catalog partition on the marketplace side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Property,
    Car,
    Equipment,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Property, Category::Car, Category::Equipment];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Property => "property",
            Category::Car => "car",
            Category::Equipment => "equipment",
        }
    }

    /// Panel heading shown above the listing grid.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Category::Property => "Property Listings",
            Category::Car => "Car Rentals",
            Category::Equipment => "Equipment Rentals",
        }
    }

    /// Kind filter options for this category; index 0 is always "any".
    #[must_use]
    pub fn kind_options(self) -> &'static [&'static str] {
        match self {
            Category::Property => &["any", "apartment", "townhouse"],
            Category::Car => &["any", "sedan", "suv"],
            Category::Equipment => &["any", "camera", "drone"],
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Category::Property => Category::Car,
            Category::Car => Category::Equipment,
            Category::Equipment => Category::Property,
        }
    }
}

/// A marketplace catalog entry. The catalog is static and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub price: i64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
    pub description: String,
}

/// A marketplace booking. No id and no payment status; identity in practice
/// is (title, start, end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub title: String,
    pub start: String,
    pub end: String,
    pub quantity: u32,
}
