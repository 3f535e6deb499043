//! Terminal storefront for the RentEase rental marketplace.
//!
//! Browses the static catalog by category with kind/price/query filters and
//! a simulated network delay before results land, books listings, tracks
//! favorites, and reviews completed rentals. Persistent collections live in
//! the same JSON store the admin console uses, under the marketplace keys.

use std::path::PathBuf;

pub mod app;
pub mod listings;
pub mod modal;
pub mod rentals;
pub mod runtime;

/// Stable crate label used by bootstrap smoke tests.
#[must_use]
pub fn crate_label() -> &'static str {
    "rentease-market-tui"
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
