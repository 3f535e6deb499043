//! Bookings tab: status management and the CSV export entry point.

use rentease_core::model::{Booking, BookingStatus};
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{clip, BorderStyle};

use crate::app::Request;
use crate::users::scroll_origin;

const PAGE_STEP: usize = 10;
const STATUS_COL: u16 = 9;

#[derive(Debug, Default)]
pub struct BookingsVm {
    rows: Vec<Booking>,
    selected: usize,
    filter: String,
    editing_filter: bool,
}

impl BookingsVm {
    pub fn set_rows(&mut self, bookings: &[Booking]) {
        let keep = self.selected_id();
        let needle = self.filter.trim().to_lowercase();
        self.rows = bookings
            .iter()
            .filter(|b| matches_filter(b, &needle))
            .cloned()
            .collect();
        if let Some(id) = keep {
            if let Some(pos) = self.rows.iter().position(|b| b.id == id) {
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
    pub fn rows(&self) -> &[Booking] {
        &self.rows
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<u32> {
        self.rows.get(self.selected).map(|b| b.id)
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn editing_filter(&self) -> bool {
        self.editing_filter
    }

    pub fn install_filter(&mut self, query: &str, bookings: &[Booking]) {
        self.filter = query.to_string();
        self.editing_filter = false;
        self.selected = 0;
        self.set_rows(bookings);
    }
}

/// The start date is matched verbatim; only the text fields fold case.
pub(crate) fn matches_filter(booking: &Booking, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    booking.item.to_lowercase().contains(needle)
        || booking.user.to_lowercase().contains(needle)
        || booking.start.contains(needle)
}

fn status_role(status: BookingStatus) -> TextRole {
    match status {
        BookingStatus::Paid => TextRole::Success,
        BookingStatus::NotPaid => TextRole::Warning,
        BookingStatus::Cancelled => TextRole::Danger,
    }
}

pub fn apply_bookings_input(
    vm: &mut BookingsVm,
    bookings: &[Booking],
    event: KeyEvent,
) -> Option<Request> {
    if vm.editing_filter {
        match event.key {
            Key::Esc => {
                vm.filter.clear();
                vm.editing_filter = false;
                vm.set_rows(bookings);
            }
            Key::Enter => vm.editing_filter = false,
            Key::Backspace => {
                vm.filter.pop();
                vm.set_rows(bookings);
            }
            Key::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                vm.filter.push(ch);
                vm.selected = 0;
                vm.set_rows(bookings);
            }
            _ => {}
        }
        return None;
    }

    if let Some(action) = translate_nav(event) {
        match action {
            UiAction::MoveUp => vm.selected = vm.selected.saturating_sub(1),
            UiAction::MoveDown => {
                if vm.selected + 1 < vm.rows.len() {
                    vm.selected += 1;
                }
            }
            UiAction::PageUp => vm.selected = vm.selected.saturating_sub(PAGE_STEP),
            UiAction::PageDown => {
                vm.selected = (vm.selected + PAGE_STEP).min(vm.rows.len().saturating_sub(1));
            }
            UiAction::Home => vm.selected = 0,
            UiAction::End => vm.selected = vm.rows.len().saturating_sub(1),
            UiAction::Activate => return vm.selected_id().map(Request::OpenBookingStatus),
            _ => {}
        }
        return None;
    }

    match event.key {
        Key::Char('s') => vm.selected_id().map(Request::OpenBookingStatus),
        Key::Char('v') => vm.selected_id().map(Request::ViewBooking),
        Key::Char('c') => Some(Request::ExportCsv),
        Key::Char('f') => {
            vm.editing_filter = true;
            None
        }
        _ => None,
    }
}

pub fn render_bookings_frame(frame: &mut RenderFrame, rect: Rect, vm: &BookingsVm) {
    let title = format!("Bookings ({})", vm.rows.len());
    let inner = frame.draw_panel(rect, Some(&title), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }

    let mut y = inner.y;
    if vm.editing_filter || !vm.filter.is_empty() {
        let role = if vm.editing_filter {
            TextRole::Focus
        } else {
            TextRole::Muted
        };
        let cursor = if vm.editing_filter { "█" } else { "" };
        frame.draw_text_clipped(
            inner.x,
            y,
            inner.width,
            &format!("filter: {}{cursor}", vm.filter),
            role,
        );
        y += 1;
    }

    let status_x = inner.x + inner.width.saturating_sub(STATUS_COL);
    let lead_w = usize::from(inner.width.saturating_sub(STATUS_COL + 2));
    let wide = inner.width >= 70;
    let item_w = if wide { 18 } else { lead_w.saturating_sub(5) };
    let user_w = lead_w.saturating_sub(item_w + 37);

    let header = if wide {
        format!(
            "{:>3}  {:item_w$}  {:user_w$}  {:23}  {:>3}",
            "ID", "ITEM", "USER", "DATES", "QTY"
        )
    } else {
        format!("{:>3}  {:item_w$}", "ID", "ITEM")
    };
    frame.draw_text_clipped(inner.x, y, lead_w as u16, &header, TextRole::Accent);
    frame.draw_text(status_x, y, "STATUS", TextRole::Accent);
    y += 1;

    if vm.rows.is_empty() {
        frame.draw_text(inner.x, y, "No bookings match.", TextRole::Muted);
        return;
    }

    let body_rows = usize::from(inner.height).saturating_sub(usize::from(y - inner.y));
    let first = scroll_origin(vm.selected, vm.rows.len(), body_rows);
    for (offset, booking) in vm.rows.iter().skip(first).take(body_rows).enumerate() {
        let row_y = y + offset as u16;
        let line = if wide {
            format!(
                "{:>3}  {:item_w$}  {:user_w$}  {:10} → {:10}  {:>3}",
                booking.id,
                clip(&booking.item, item_w),
                clip(&booking.user, user_w),
                booking.start,
                booking.end,
                booking.qty
            )
        } else {
            format!("{:>3}  {:item_w$}", booking.id, clip(&booking.item, item_w))
        };
        frame.draw_text_clipped(inner.x, row_y, lead_w as u16, &line, TextRole::Default);
        frame.draw_text(
            status_x,
            row_y,
            booking.status.as_str(),
            status_role(booking.status),
        );
        if first + offset == vm.selected {
            frame.highlight_span(inner.x, row_y, inner.width);
        }
    }
}
