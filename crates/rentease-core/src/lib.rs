//! rentease-core: domain model, seed data and key-value persistence shared by
//! the RentEase admin dashboard and marketplace apps.
//!
//! Everything here is small and synchronous: collections are plain vectors
//! hydrated from string-keyed JSON documents, mutators change exactly one
//! thing and flush before anyone re-renders, and derived views (stats, CSV)
//! are pure functions over the hydrated state.

pub mod export;
pub mod model;
pub mod seed;
pub mod state;
pub mod stats;
pub mod store;

use chrono::{SecondsFormat, Utc};

/// Crate identity label used by bootstrap smoke tests.
#[must_use]
pub fn crate_label() -> &'static str {
    "rentease-core"
}

/// Current time as an RFC 3339 UTC string, the format log entries carry.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Today's date as an ISO `YYYY-MM-DD` string.
///
/// Date comparisons in this codebase are plain string comparisons, which is
/// sound for this fixed format and mirrors how bookings store their dates.
#[must_use]
pub fn today_str() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{crate_label, now_rfc3339, today_str};

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "rentease-core");
    }

    #[test]
    fn now_rfc3339_parses_back() {
        let stamp = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn today_str_is_iso_date_shaped() {
        let today = today_str();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
    }
}
