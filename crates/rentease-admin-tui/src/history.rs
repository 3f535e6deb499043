//! Rental history tab: completed bookings with per-item star ratings.

use chrono::NaiveDate;
use rentease_core::model::BookingStatus;
use rentease_core::state::AdminState;
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{clip, BorderStyle};

use crate::app::Request;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub booking_id: u32,
    pub item: String,
    pub start: String,
    pub end: String,
    pub status: BookingStatus,
    /// 0 means unrated.
    pub rating: u8,
}

#[derive(Debug, Default)]
pub struct HistoryVm {
    rows: Vec<HistoryRow>,
    selected: usize,
}

impl HistoryVm {
    /// Completed rentals only (end strictly before today), in storage order.
    pub fn set_rows(&mut self, state: &AdminState, today: &str) {
        let keep = self.selected_row().map(|r| r.booking_id);
        self.rows = state
            .bookings
            .iter()
            .filter(|b| b.end.as_str() < today)
            .map(|b| HistoryRow {
                booking_id: b.id,
                item: b.item.clone(),
                start: b.start.clone(),
                end: b.end.clone(),
                status: b.status,
                rating: state.ratings.get(&b.item).copied().unwrap_or(0),
            })
            .collect();
        if let Some(id) = keep {
            if let Some(pos) = self.rows.iter().position(|r| r.booking_id == id) {
                self.selected = pos;
                return;
            }
        }
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&HistoryRow> {
        self.rows.get(self.selected)
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }
}

pub fn apply_history_input(vm: &mut HistoryVm, event: KeyEvent) -> Option<Request> {
    if let Some(action) = translate_nav(event) {
        match action {
            UiAction::MoveUp => vm.selected = vm.selected.saturating_sub(1),
            UiAction::MoveDown => {
                if vm.selected + 1 < vm.rows.len() {
                    vm.selected += 1;
                }
            }
            UiAction::Home => vm.selected = 0,
            UiAction::End => vm.selected = vm.rows.len().saturating_sub(1),
            UiAction::Activate => return open_rating(vm),
            _ => {}
        }
        return None;
    }
    if event.key == Key::Char('r') {
        return open_rating(vm);
    }
    None
}

fn open_rating(vm: &HistoryVm) -> Option<Request> {
    vm.selected_row().map(|row| Request::OpenRating {
        title: row.item.clone(),
        current: row.rating,
    })
}

/// `2025-08-10` shown as `Aug 10, 2025`; anything unparseable stays raw.
fn format_day(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |d| d.format("%b %-d, %Y").to_string())
}

fn stars(rating: u8) -> String {
    (1..=5).map(|n| if n <= rating { '★' } else { '☆' }).collect()
}

pub fn render_history_frame(frame: &mut RenderFrame, rect: Rect, vm: &HistoryVm) {
    let title = format!("Rental history ({})", vm.rows.len());
    let inner = frame.draw_panel(rect, Some(&title), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }
    if vm.rows.is_empty() {
        frame.draw_text(inner.x, inner.y, "No completed rentals yet.", TextRole::Muted);
        return;
    }

    let header = format!(
        "{:20}  {:10}  {:14}  {:14}  {:9}  {}",
        "ITEM", "CATEGORY", "FROM", "TO", "STATUS", "RATING"
    );
    frame.draw_text_clipped(inner.x, inner.y, inner.width, &header, TextRole::Accent);

    let body_rows = usize::from(inner.height).saturating_sub(2);
    for (i, row) in vm.rows.iter().take(body_rows).enumerate() {
        let y = inner.y + 1 + i as u16;
        // Bookings carry no category of their own; the column is fixed.
        let line = format!(
            "{:20}  {:10}  {:14}  {:14}  {:9}",
            clip(&row.item, 20),
            "N/A",
            format_day(&row.start),
            format_day(&row.end),
            row.status.as_str()
        );
        frame.draw_text_clipped(inner.x, y, inner.width, &line, TextRole::Default);
        let star_role = if row.rating > 0 {
            TextRole::Warning
        } else {
            TextRole::Muted
        };
        frame.draw_text(inner.x + 77, y, &stars(row.rating), star_role);
        if i == vm.selected {
            frame.highlight_span(inner.x, y, inner.width);
        }
    }

    let hint_y = inner.y + inner.height.saturating_sub(1);
    frame.draw_text(
        inner.x,
        hint_y,
        "Enter rates the selected item.",
        TextRole::Muted,
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use rentease_core::model::Settings;
    use rentease_core::seed;
    use rentease_tui_adapter::style::{Theme, ThemeKind};

    fn seeded_state() -> AdminState {
        AdminState {
            users: seed::users(),
            items: seed::items(),
            bookings: seed::bookings(),
            ratings: std::collections::BTreeMap::new(),
            settings: Settings::default(),
        }
    }

    #[test]
    fn only_strictly_past_bookings_appear() {
        let mut vm = HistoryVm::default();
        vm.set_rows(&seeded_state(), "2025-08-20");
        let ids: Vec<u32> = vm.rows().iter().map(|r| r.booking_id).collect();
        assert_eq!(ids, vec![1, 3], "booking 2 ends 2025-08-31, still open");

        vm.set_rows(&seeded_state(), "2025-08-11");
        let ids: Vec<u32> = vm.rows().iter().map(|r| r.booking_id).collect();
        assert_eq!(ids, vec![3], "end date equal to today is not past");
    }

    #[test]
    fn rows_join_ratings_by_item_title() {
        let mut state = seeded_state();
        state.ratings.insert("City Sedan".to_string(), 4);
        let mut vm = HistoryVm::default();
        vm.set_rows(&state, "2025-08-20");
        assert_eq!(vm.rows()[0].rating, 4);
        assert_eq!(vm.rows()[1].rating, 0);
    }

    #[test]
    fn dates_render_in_short_month_form() {
        assert_eq!(format_day("2025-08-10"), "Aug 10, 2025");
        assert_eq!(format_day("2025-12-01"), "Dec 1, 2025");
        assert_eq!(format_day("soon"), "soon");
    }

    #[test]
    fn star_row_fills_to_rating() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn enter_opens_a_rating_for_the_selected_item() {
        let mut state = seeded_state();
        state.ratings.insert("City Sedan".to_string(), 4);
        let mut vm = HistoryVm::default();
        vm.set_rows(&state, "2025-08-20");
        let request = apply_history_input(&mut vm, KeyEvent::plain(Key::Enter));
        assert_eq!(
            request,
            Some(Request::OpenRating {
                title: "City Sedan".to_string(),
                current: 4,
            })
        );
        apply_history_input(&mut vm, KeyEvent::plain(Key::Char('j')));
        let request = apply_history_input(&mut vm, KeyEvent::plain(Key::Char('r')));
        assert_eq!(
            request,
            Some(Request::OpenRating {
                title: "Power Drill".to_string(),
                current: 0,
            })
        );
    }

    #[test]
    fn rendered_table_shows_ratings_column() {
        let mut state = seeded_state();
        state.ratings.insert("City Sedan".to_string(), 2);
        let mut vm = HistoryVm::default();
        vm.set_rows(&state, "2025-08-20");
        let mut frame = RenderFrame::new(100, 10, Theme::for_kind(ThemeKind::Dark));
        let area = frame.area();
        render_history_frame(&mut frame, area, &vm);
        assert!(frame.row_text(1).contains("RATING"));
        assert!(frame.row_text(2).contains("N/A"));
        assert!(frame.row_text(2).contains("Aug 10, 2025"));
        assert!(frame.row_text(2).contains("★★☆☆☆"));
    }
}
