//! Activity log tab. Entries are stored oldest-first; this view shows them
//! newest-first with a scroll offset.

use chrono::DateTime;
use rentease_core::model::LogEntry;
use rentease_tui_adapter::input::{translate_nav, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::BorderStyle;

const PAGE_STEP: usize = 10;
const TIMESTAMP_COL: u16 = 18;

#[derive(Debug, Default)]
pub struct LogsVm {
    /// Newest first.
    entries: Vec<LogEntry>,
    offset: usize,
}

impl LogsVm {
    /// Accepts entries in storage order (oldest first) and flips them for
    /// display.
    pub fn set_entries(&mut self, mut entries: Vec<LogEntry>) {
        entries.reverse();
        self.entries = entries;
        self.offset = self.offset.min(self.entries.len().saturating_sub(1));
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

pub fn apply_logs_input(vm: &mut LogsVm, event: KeyEvent) {
    let max_offset = vm.entries.len().saturating_sub(1);
    if let Some(action) = translate_nav(event) {
        match action {
            UiAction::MoveUp => vm.offset = vm.offset.saturating_sub(1),
            UiAction::MoveDown => vm.offset = (vm.offset + 1).min(max_offset),
            UiAction::PageUp => vm.offset = vm.offset.saturating_sub(PAGE_STEP),
            UiAction::PageDown => vm.offset = (vm.offset + PAGE_STEP).min(max_offset),
            UiAction::Home => vm.offset = 0,
            UiAction::End => vm.offset = max_offset,
            _ => {}
        }
    }
}

fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map_or_else(|_| raw.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

pub fn render_logs_frame(frame: &mut RenderFrame, rect: Rect, vm: &LogsVm) {
    let title = format!("Activity log ({})", vm.entries.len());
    let inner = frame.draw_panel(rect, Some(&title), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }
    if vm.entries.is_empty() {
        frame.draw_text(inner.x, inner.y, "No logs", TextRole::Muted);
        return;
    }
    let visible = usize::from(inner.height);
    for (i, entry) in vm.entries.iter().skip(vm.offset).take(visible).enumerate() {
        let y = inner.y + i as u16;
        frame.draw_text(inner.x, y, &format_timestamp(&entry.t), TextRole::Muted);
        frame.draw_text_clipped(
            inner.x + TIMESTAMP_COL,
            y,
            inner.width.saturating_sub(TIMESTAMP_COL),
            &entry.text,
            TextRole::Default,
        );
    }
}
