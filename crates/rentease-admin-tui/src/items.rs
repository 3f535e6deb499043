//! Items tab: the rental inventory table.

use rentease_core::model::Item;
use rentease_core::stats::format_peso;
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{clip, BorderStyle};

use crate::app::Request;
use crate::users::scroll_origin;

const PAGE_STEP: usize = 10;

#[derive(Debug, Default)]
pub struct ItemsVm {
    rows: Vec<Item>,
    selected: usize,
    filter: String,
    editing_filter: bool,
}

impl ItemsVm {
    pub fn set_rows(&mut self, items: &[Item]) {
        let keep = self.selected_id();
        let needle = self.filter.trim().to_lowercase();
        self.rows = items
            .iter()
            .filter(|i| matches_filter(i, &needle))
            .cloned()
            .collect();
        if let Some(id) = keep {
            if let Some(pos) = self.rows.iter().position(|i| i.id == id) {
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
    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<u32> {
        self.rows.get(self.selected).map(|i| i.id)
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn editing_filter(&self) -> bool {
        self.editing_filter
    }

    pub fn install_filter(&mut self, query: &str, items: &[Item]) {
        self.filter = query.to_string();
        self.editing_filter = false;
        self.selected = 0;
        self.set_rows(items);
    }
}

pub(crate) fn matches_filter(item: &Item, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack =
        format!("{} {} {}", item.title, item.category, item.location).to_lowercase();
    haystack.contains(needle)
}

pub fn apply_items_input(
    vm: &mut ItemsVm,
    items: &[Item],
    event: KeyEvent,
) -> Option<Request> {
    if vm.editing_filter {
        match event.key {
            Key::Esc => {
                vm.filter.clear();
                vm.editing_filter = false;
                vm.set_rows(items);
            }
            Key::Enter => vm.editing_filter = false,
            Key::Backspace => {
                vm.filter.pop();
                vm.set_rows(items);
            }
            Key::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                vm.filter.push(ch);
                vm.selected = 0;
                vm.set_rows(items);
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
            UiAction::Activate => return vm.selected_id().map(Request::OpenItemEdit),
            _ => {}
        }
        return None;
    }

    match event.key {
        Key::Char('a') => Some(Request::OpenItemAdd),
        Key::Char('e') => vm.selected_id().map(Request::OpenItemEdit),
        Key::Char('t') => vm.selected_id().map(Request::ToggleItem),
        Key::Char('x') | Key::Delete => vm.selected_id().map(Request::ConfirmDeleteItem),
        Key::Char('f') => {
            vm.editing_filter = true;
            None
        }
        _ => None,
    }
}

pub fn render_items_frame(frame: &mut RenderFrame, rect: Rect, vm: &ItemsVm) {
    let title = format!("Items ({})", vm.rows.len());
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

    let wide = inner.width >= 60;
    let title_w = if wide { 22 } else { usize::from(inner.width).saturating_sub(12) };
    let loc_w = usize::from(inner.width).saturating_sub(title_w + 40);

    let header = if wide {
        format!(
            "{:>3}  {:title_w$}  {:10}  {:>10}  {:loc_w$}  {:6}",
            "ID", "TITLE", "CATEGORY", "PRICE/DAY", "LOCATION", "ACTIVE"
        )
    } else {
        format!("{:>3}  {:title_w$}  {:6}", "ID", "TITLE", "ACTIVE")
    };
    frame.draw_text_clipped(inner.x, y, inner.width, &header, TextRole::Accent);
    y += 1;

    if vm.rows.is_empty() {
        frame.draw_text(inner.x, y, "No items match.", TextRole::Muted);
        return;
    }

    let body_rows = usize::from(inner.height).saturating_sub(usize::from(y - inner.y));
    let first = scroll_origin(vm.selected, vm.rows.len(), body_rows);
    for (offset, item) in vm.rows.iter().skip(first).take(body_rows).enumerate() {
        let row_y = y + offset as u16;
        let active = if item.active { "yes" } else { "no" };
        let line = if wide {
            format!(
                "{:>3}  {:title_w$}  {:10}  {:>10}  {:loc_w$}  {:6}",
                item.id,
                clip(&item.title, title_w),
                clip(&item.category, 10),
                format_peso(item.price),
                clip(&item.location, loc_w),
                active
            )
        } else {
            format!(
                "{:>3}  {:title_w$}  {:6}",
                item.id,
                clip(&item.title, title_w),
                active
            )
        };
        let role = if item.active {
            TextRole::Default
        } else {
            TextRole::Muted
        };
        frame.draw_text_clipped(inner.x, row_y, inner.width, &line, role);
        if first + offset == vm.selected {
            frame.highlight_span(inner.x, row_y, inner.width);
        }
    }
}
