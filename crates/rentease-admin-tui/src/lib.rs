//! Terminal admin console for the RentEase rental marketplace.
//!
//! One tab per collection (users, items, bookings, settings, logs, rental
//! history) over the shared JSON store, plus an overview dashboard. Views
//! are plain view-models rendered into adapter frames; all mutation goes
//! through [`rentease_core::state::AdminState`].

use std::path::PathBuf;

pub mod app;
pub mod bookings;
pub mod history;
pub mod items;
pub mod logs;
pub mod modal;
pub mod overview;
pub mod runtime;
pub mod settings;
pub mod users;

/// Stable crate label used by bootstrap smoke tests.
#[must_use]
pub fn crate_label() -> &'static str {
    "rentease-admin-tui"
}

/// Store directory: `RENTEASE_DIR` when set, otherwise `~/.rentease`.
pub fn resolve_store_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("RENTEASE_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = std::env::var_os("HOME") {
        let mut dir = PathBuf::from(home);
        dir.push(".rentease");
        return dir;
    }
    PathBuf::from(".rentease")
}

#[cfg(test)]
mod tests {
    use super::crate_label;

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "rentease-admin-tui");
    }
}
