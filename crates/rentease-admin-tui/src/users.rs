//! Users tab: filterable table with add/edit/toggle/delete entry points.

use rentease_core::model::User;
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{clip, BorderStyle};

use crate::app::Request;

const PAGE_STEP: usize = 10;

#[derive(Debug, Default)]
pub struct UsersVm {
    rows: Vec<User>,
    selected: usize,
    filter: String,
    editing_filter: bool,
}

impl UsersVm {
    /// Rebuild the visible rows from the full collection, re-applying the
    /// filter and keeping the selection on the same record when it survives.
    pub fn set_rows(&mut self, users: &[User]) {
        let keep = self.selected_id();
        let needle = self.filter.trim().to_lowercase();
        self.rows = users
            .iter()
            .filter(|u| matches_filter(u, &needle))
            .cloned()
            .collect();
        if let Some(id) = keep {
            if let Some(pos) = self.rows.iter().position(|u| u.id == id) {
                self.selected = pos;
                return;
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<u32> {
        self.rows.get(self.selected).map(|u| u.id)
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn editing_filter(&self) -> bool {
        self.editing_filter
    }

    /// Global search landing here installs the query as the table filter.
    pub fn install_filter(&mut self, query: &str, users: &[User]) {
        self.filter = query.to_string();
        self.editing_filter = false;
        self.selected = 0;
        self.set_rows(users);
    }
}

pub(crate) fn matches_filter(user: &User, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", user.name, user.email, user.role.as_str()).to_lowercase();
    haystack.contains(needle)
}

pub fn apply_users_input(
    vm: &mut UsersVm,
    users: &[User],
    event: KeyEvent,
) -> Option<Request> {
    if vm.editing_filter {
        match event.key {
            Key::Esc => {
                vm.filter.clear();
                vm.editing_filter = false;
                vm.set_rows(users);
            }
            Key::Enter => vm.editing_filter = false,
            Key::Backspace => {
                vm.filter.pop();
                vm.set_rows(users);
            }
            Key::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                vm.filter.push(ch);
                vm.selected = 0;
                vm.set_rows(users);
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
            UiAction::Activate => return vm.selected_id().map(Request::OpenUserEdit),
            _ => {}
        }
        return None;
    }

    match event.key {
        Key::Char('a') => Some(Request::OpenUserAdd),
        Key::Char('e') => vm.selected_id().map(Request::OpenUserEdit),
        Key::Char('t') => vm.selected_id().map(Request::ToggleUser),
        Key::Char('x') | Key::Delete => vm.selected_id().map(Request::ConfirmDeleteUser),
        Key::Char('f') => {
            vm.editing_filter = true;
            None
        }
        _ => None,
    }
}

pub fn render_users_frame(frame: &mut RenderFrame, rect: Rect, vm: &UsersVm) {
    let title = format!("Users ({})", vm.rows.len());
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
    let name_w = if wide { 18 } else { usize::from(inner.width).saturating_sub(12) };
    let email_w = usize::from(inner.width).saturating_sub(name_w + 24);

    let header = if wide {
        format!(
            "{:>3}  {:name_w$}  {:email_w$}  {:6}  {:6}",
            "ID", "NAME", "EMAIL", "ROLE", "ACTIVE"
        )
    } else {
        format!("{:>3}  {:name_w$}  {:6}", "ID", "NAME", "ACTIVE")
    };
    frame.draw_text_clipped(inner.x, y, inner.width, &header, TextRole::Accent);
    y += 1;

    if vm.rows.is_empty() {
        frame.draw_text(inner.x, y, "No users match.", TextRole::Muted);
        return;
    }

    let body_rows = usize::from(inner.height).saturating_sub(usize::from(y - inner.y));
    let first = scroll_origin(vm.selected, vm.rows.len(), body_rows);
    for (offset, user) in vm.rows.iter().skip(first).take(body_rows).enumerate() {
        let row_y = y + offset as u16;
        let active = if user.active { "yes" } else { "no" };
        let line = if wide {
            format!(
                "{:>3}  {:name_w$}  {:email_w$}  {:6}  {:6}",
                user.id,
                clip(&user.name, name_w),
                clip(&user.email, email_w),
                user.role.as_str(),
                active
            )
        } else {
            format!(
                "{:>3}  {:name_w$}  {:6}",
                user.id,
                clip(&user.name, name_w),
                active
            )
        };
        let role = if user.active {
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

/// First visible row index so the selection stays on screen.
pub(crate) fn scroll_origin(selected: usize, total: usize, visible: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    let max_first = total - visible;
    selected.saturating_sub(visible / 2).min(max_first)
}
