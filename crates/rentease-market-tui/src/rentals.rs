//! The renter's bookings, split into active rentals and finished history.
//!
//! A rental whose end date sorts before today's date is history; one ending
//! today is still active. History rows can be reviewed, and show the stored
//! review text next to the completed badge.

use rentease_core::state::MarketState;
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{clip, BorderStyle};

use crate::app::Request;

const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRow {
    pub title: String,
    pub start: String,
    pub end: String,
    pub quantity: u32,
    pub completed: bool,
    pub review: Option<String>,
}

#[derive(Default)]
pub struct RentalsVm {
    rows: Vec<RentalRow>,
    selected: usize,
}

impl RentalsVm {
    #[must_use]
    pub fn rows(&self) -> &[RentalRow] {
        &self.rows
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&RentalRow> {
        self.rows.get(self.selected)
    }

    /// Rebuild from the persisted rentals: active ones first in booking
    /// order, then the completed history in booking order.
    pub fn set_rows(&mut self, state: &MarketState, today: &str) {
        let mut active = Vec::new();
        let mut completed = Vec::new();
        for rental in &state.rentals {
            let done = rental.end.as_str() < today;
            let row = RentalRow {
                title: rental.title.clone(),
                start: rental.start.clone(),
                end: rental.end.clone(),
                quantity: rental.quantity,
                completed: done,
                review: state.review_for(&rental.title).map(str::to_string),
            };
            if done {
                completed.push(row);
            } else {
                active.push(row);
            }
        }
        active.extend(completed);
        self.rows = active;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }
}

pub fn apply_rentals_input(vm: &mut RentalsVm, event: KeyEvent) -> Option<Request> {
    if let Some(action) = translate_nav(event) {
        let last = vm.rows.len().saturating_sub(1);
        match action {
            UiAction::MoveUp => vm.selected = vm.selected.saturating_sub(1),
            UiAction::MoveDown => vm.selected = (vm.selected + 1).min(last),
            UiAction::PageUp => vm.selected = vm.selected.saturating_sub(PAGE_STEP),
            UiAction::PageDown => vm.selected = (vm.selected + PAGE_STEP).min(last),
            UiAction::Home => vm.selected = 0,
            UiAction::End => vm.selected = last,
            UiAction::Activate => return review_request(vm),
            _ => {}
        }
        return None;
    }
    match event.key {
        Key::Char('r') => review_request(vm),
        _ => None,
    }
}

/// Only finished rentals can be reviewed.
fn review_request(vm: &RentalsVm) -> Option<Request> {
    vm.selected_row()
        .filter(|row| row.completed)
        .map(|row| Request::OpenReview(row.title.clone()))
}

struct Line {
    text: String,
    role: TextRole,
    row: Option<usize>,
}

pub fn render_rentals_frame(frame: &mut RenderFrame, rect: Rect, vm: &RentalsVm) {
    let title = format!("My Rentals ({})", vm.rows.len());
    let inner = frame.draw_panel(rect, Some(&title), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }

    let lines = build_lines(vm);
    let visible = usize::from(inner.height);
    let anchor = lines
        .iter()
        .position(|line| line.row == Some(vm.selected))
        .unwrap_or(0);
    let origin = scroll_origin(anchor, lines.len(), visible);
    for (offset, line) in lines.iter().skip(origin).take(visible).enumerate() {
        let y = inner.y + offset as u16;
        frame.draw_text_clipped(inner.x, y, inner.width, &line.text, line.role);
        if line.row.is_some() && line.row == Some(vm.selected) {
            frame.highlight_span(inner.x, y, inner.width);
        }
    }
}

fn build_lines(vm: &RentalsVm) -> Vec<Line> {
    let mut lines = vec![Line {
        text: "Active".to_string(),
        role: TextRole::Accent,
        row: None,
    }];
    let mut any_active = false;
    for (idx, row) in vm.rows.iter().enumerate() {
        if row.completed {
            continue;
        }
        any_active = true;
        lines.push(Line {
            text: format!(
                "{:<24} {} → {}   Qty: {}",
                clip(&row.title, 24),
                row.start,
                row.end,
                row.quantity
            ),
            role: TextRole::Default,
            row: Some(idx),
        });
    }
    if !any_active {
        lines.push(Line {
            text: "No active bookings.".to_string(),
            role: TextRole::Muted,
            row: None,
        });
    }

    lines.push(Line {
        text: String::new(),
        role: TextRole::Default,
        row: None,
    });
    lines.push(Line {
        text: "Past rentals".to_string(),
        role: TextRole::Accent,
        row: None,
    });
    let mut any_completed = false;
    for (idx, row) in vm.rows.iter().enumerate() {
        if !row.completed {
            continue;
        }
        any_completed = true;
        let review = row.review.as_deref().unwrap_or("No review yet.");
        lines.push(Line {
            text: format!(
                "{:<24} {} → {}   Completed   {}",
                clip(&row.title, 24),
                row.start,
                row.end,
                review
            ),
            role: TextRole::Default,
            row: Some(idx),
        });
    }
    if !any_completed {
        lines.push(Line {
            text: "No past rentals.".to_string(),
            role: TextRole::Muted,
            row: None,
        });
    }
    lines
}

fn scroll_origin(selected: usize, total: usize, visible: usize) -> usize {
    if total <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(total - visible)
}
