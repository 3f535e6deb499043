//! Booking export. Plain comma joins with no quoting, matching the shape
//! downstream spreadsheets already expect; fields containing commas are not
//! escaped.

use std::fs;
use std::path::PathBuf;

use crate::model::Booking;
use crate::store::{Store, StoreError};

pub const CSV_FILE_NAME: &str = "bookings.csv";

const CSV_HEADER: &str = "id,item,user,start,end,qty,status";

/// Render the bookings table as CSV text. Header first, one row per booking,
/// newline-joined without a trailing newline.
#[must_use]
pub fn bookings_csv(bookings: &[Booking]) -> String {
    let mut lines = Vec::with_capacity(bookings.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(bookings.iter().map(|b| {
        format!(
            "{},{},{},{},{},{},{}",
            b.id,
            b.item,
            b.user,
            b.start,
            b.end,
            b.qty,
            b.status.as_str()
        )
    }));
    lines.join("\n")
}

/// Write the export next to the JSON collections and return its path.
pub fn write_bookings_csv(store: &Store, bookings: &[Booking]) -> Result<PathBuf, StoreError> {
    let path = store.root().join(CSV_FILE_NAME);
    fs::write(&path, bookings_csv(bookings))?;
    Ok(path)
}
