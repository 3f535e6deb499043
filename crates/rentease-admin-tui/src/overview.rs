//! Overview tab: headline counters and the recent-activity feed.

use rentease_core::state::AdminState;
use rentease_core::stats::{compute_stats, format_peso, recent_activity, StatsSnapshot};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::BorderStyle;

#[derive(Debug, Default)]
pub struct OverviewVm {
    stats: StatsSnapshot,
    activity: Vec<String>,
}

impl OverviewVm {
    pub fn refresh(&mut self, state: &AdminState, today: &str) {
        self.stats = compute_stats(state, today);
        self.activity = recent_activity(state);
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats
    }

    #[must_use]
    pub fn activity(&self) -> &[String] {
        &self.activity
    }
}

pub fn render_overview_frame(frame: &mut RenderFrame, rect: Rect, vm: &OverviewVm) {
    let (cards_row, rest) = rect.split_top(4);
    render_cards(frame, cards_row, vm.stats);

    let inner = frame.draw_panel(rest, Some("Recent activity"), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }
    if vm.activity.is_empty() {
        frame.draw_text(inner.x, inner.y, "Nothing yet.", TextRole::Muted);
        return;
    }
    for (i, line) in vm
        .activity
        .iter()
        .take(usize::from(inner.height))
        .enumerate()
    {
        let y = inner.y + i as u16;
        frame.draw_text(inner.x, y, "•", TextRole::Accent);
        frame.draw_text_clipped(
            inner.x + 2,
            y,
            inner.width.saturating_sub(2),
            line,
            TextRole::Default,
        );
    }
}

fn render_cards(frame: &mut RenderFrame, rect: Rect, stats: StatsSnapshot) {
    let cards = [
        ("Users", stats.total_users.to_string()),
        ("Items", stats.total_items.to_string()),
        ("Bookings", stats.total_bookings.to_string()),
        ("Upcoming", stats.upcoming_bookings.to_string()),
        ("Revenue", format_peso(stats.revenue)),
    ];
    let count = cards.len() as u16;
    let mut remaining = rect;
    for (i, (label, value)) in cards.iter().enumerate() {
        let slots_left = count - i as u16;
        let width = remaining.width / slots_left;
        let (card, rest) = remaining.split_left(width);
        remaining = rest;
        let inner = frame.draw_panel(card, Some(label), BorderStyle::Rounded);
        if !inner.is_empty() {
            frame.draw_text_clipped(inner.x, inner.y, inner.width, value, TextRole::Accent);
        }
    }
}
