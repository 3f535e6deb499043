//! Settings tab: four persisted flags, toggled in place.

use rentease_core::model::{SettingKey, Settings};
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::BorderStyle;

use crate::app::Request;

#[derive(Debug, Default)]
pub struct SettingsVm {
    selected: usize,
}

impl SettingsVm {
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_key(&self) -> SettingKey {
        SettingKey::ALL[self.selected.min(SettingKey::ALL.len() - 1)]
    }
}

pub fn apply_settings_input(
    vm: &mut SettingsVm,
    settings: &Settings,
    event: KeyEvent,
) -> Option<Request> {
    if let Some(action) = translate_nav(event) {
        match action {
            UiAction::MoveUp => vm.selected = vm.selected.saturating_sub(1),
            UiAction::MoveDown => {
                if vm.selected + 1 < SettingKey::ALL.len() {
                    vm.selected += 1;
                }
            }
            UiAction::Home => vm.selected = 0,
            UiAction::End => vm.selected = SettingKey::ALL.len() - 1,
            UiAction::Activate => {
                let key = vm.selected_key();
                return Some(Request::SetSetting(key, !settings.get(key)));
            }
            _ => {}
        }
        return None;
    }
    match event.key {
        Key::Char(' ') | Key::Char('t') => {
            let key = vm.selected_key();
            Some(Request::SetSetting(key, !settings.get(key)))
        }
        _ => None,
    }
}

pub fn render_settings_frame(
    frame: &mut RenderFrame,
    rect: Rect,
    vm: &SettingsVm,
    settings: &Settings,
) {
    let inner = frame.draw_panel(rect, Some("Settings"), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }
    for (i, key) in SettingKey::ALL.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let on = settings.get(*key);
        let box_mark = if on { "[x]" } else { "[ ]" };
        let box_role = if on {
            TextRole::Success
        } else {
            TextRole::Muted
        };
        frame.draw_text(inner.x, y, box_mark, box_role);
        frame.draw_text_clipped(
            inner.x + 4,
            y,
            inner.width.saturating_sub(4),
            key.label(),
            TextRole::Default,
        );
        let key_text = key.storage_key();
        let key_x = inner.x + inner.width.saturating_sub(key_text.len() as u16);
        frame.draw_text(key_x, y, key_text, TextRole::Muted);
        if i == vm.selected {
            frame.highlight_span(inner.x, y, inner.width);
        }
    }
    let hint_y = inner.y + SettingKey::ALL.len() as u16 + 1;
    frame.draw_text(
        inner.x,
        hint_y,
        "Space toggles. Changes persist immediately and are logged.",
        TextRole::Muted,
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use rentease_tui_adapter::style::{Theme, ThemeKind};

    #[test]
    fn defaults_render_with_guest_browsing_on() {
        let vm = SettingsVm::default();
        let settings = Settings::default();
        let mut frame = RenderFrame::new(70, 10, Theme::for_kind(ThemeKind::Dark));
        let area = frame.area();
        render_settings_frame(&mut frame, area, &vm, &settings);
        assert!(frame.row_text(1).starts_with("│[ ] Maintenance mode"));
        assert!(frame.row_text(2).starts_with("│[x] Allow guest browsing"));
        assert!(frame.row_text(1).ends_with("setting-maintenance│"));
    }

    #[test]
    fn toggle_request_flips_current_value() {
        let mut vm = SettingsVm::default();
        let settings = Settings::default();
        let request = apply_settings_input(
            &mut vm,
            &settings,
            KeyEvent::plain(Key::Char(' ')),
        );
        assert_eq!(
            request,
            Some(Request::SetSetting(SettingKey::Maintenance, true))
        );

        apply_settings_input(&mut vm, &settings, KeyEvent::plain(Key::Char('j')));
        let request = apply_settings_input(&mut vm, &settings, KeyEvent::plain(Key::Enter));
        assert_eq!(
            request,
            Some(Request::SetSetting(SettingKey::AllowGuest, false))
        );
    }

    #[test]
    fn selection_stops_at_last_setting() {
        let mut vm = SettingsVm::default();
        let settings = Settings::default();
        for _ in 0..10 {
            apply_settings_input(&mut vm, &settings, KeyEvent::plain(Key::Char('j')));
        }
        assert_eq!(vm.selected(), SettingKey::ALL.len() - 1);
    }
}
