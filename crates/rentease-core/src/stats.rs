//! Derived overview numbers. Everything here is recomputed from
//! [`AdminState`] on demand; nothing is cached or persisted.

use crate::model::Booking;
use crate::state::AdminState;

/// Headline counters for the overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_users: usize,
    pub total_items: usize,
    pub total_bookings: usize,
    /// Bookings whose end date is today or later (string compare on ISO dates).
    pub upcoming_bookings: usize,
    /// Sum of price x quantity over bookings counted as paid, in whole pesos.
    pub revenue: i64,
}

#[must_use]
pub fn compute_stats(state: &AdminState, today: &str) -> StatsSnapshot {
    let revenue = state
        .bookings
        .iter()
        .filter(|b| b.status.counts_as_paid())
        .map(|b| booking_amount(state, b))
        .sum();
    let upcoming_bookings = state
        .bookings
        .iter()
        .filter(|b| b.end.as_str() >= today)
        .count();
    StatsSnapshot {
        total_users: state.users.len(),
        total_items: state.items.len(),
        total_bookings: state.bookings.len(),
        upcoming_bookings,
        revenue,
    }
}

/// Price x quantity for one booking; unknown item titles contribute zero.
#[must_use]
pub fn booking_amount(state: &AdminState, booking: &Booking) -> i64 {
    let price = state
        .find_item_by_title(&booking.item)
        .map_or(0, |item| item.price);
    price * i64::from(booking.qty)
}

/// Feed for the overview panel: the newest eight bookings followed by the
/// newest four items, each formatted as a single line.
#[must_use]
pub fn recent_activity(state: &AdminState) -> Vec<String> {
    let mut lines: Vec<String> = state
        .bookings
        .iter()
        .rev()
        .take(8)
        .map(|b| format!("{} booked {} ({} → {})", b.user, b.item, b.start, b.end))
        .collect();
    lines.extend(
        state
            .items
            .iter()
            .rev()
            .take(4)
            .map(|item| format!("Item added: {} ({})", item.title, item.category)),
    );
    lines
}

/// Whole-peso display with thousands grouping, e.g. `₱18,300`.
#[must_use]
pub fn format_peso(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-₱{grouped}")
    } else {
        format!("₱{grouped}")
    }
}
