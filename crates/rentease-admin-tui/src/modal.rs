//! Single-slot modal controller. Opening a modal replaces whatever was
//! active; submitting hands a typed payload back to the app, which runs the
//! mutator and decides whether the modal closes.

use rentease_core::model::{Booking, BookingStatus, Item, Role, User};
use rentease_core::state::{ItemForm, UserForm};
use rentease_core::stats::format_peso;
use rentease_tui_adapter::input::{Key, KeyEvent};
use rentease_tui_adapter::render::RenderFrame;
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{centered_rect, render_form, BorderStyle, FormField};

const MODAL_WIDTH: u16 = 46;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    UserAdd,
    UserEdit(u32),
    ItemAdd,
    ItemEdit(u32),
    BookingStatus(u32),
    /// Carries the item title being rated.
    Rating(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModal {
    pub title: String,
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    DeleteUser(u32),
    DeleteItem(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmModal {
    pub title: String,
    pub body: String,
    pub kind: ConfirmKind,
}

/// Read-only key/value card. Any dismissal key closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoModal {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Form(FormModal),
    Confirm(ConfirmModal),
    Info(InfoModal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    Pending,
    Submit,
    Cancel,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn role_options() -> Vec<&'static str> {
    Role::ALL.iter().map(|r| r.as_str()).collect()
}

#[must_use]
pub fn user_add_modal() -> Modal {
    Modal::Form(FormModal {
        title: "Add user".to_string(),
        kind: FormKind::UserAdd,
        fields: vec![
            FormField::text("Name", ""),
            FormField::text("Email", ""),
            FormField::choice("Role", &role_options(), 0),
        ],
        focused: 0,
    })
}

#[must_use]
pub fn user_edit_modal(user: &User) -> Modal {
    let role_idx = Role::ALL.iter().position(|r| *r == user.role).unwrap_or(0);
    Modal::Form(FormModal {
        title: "Edit user".to_string(),
        kind: FormKind::UserEdit(user.id),
        fields: vec![
            FormField::text("Name", &user.name),
            FormField::text("Email", &user.email),
            FormField::choice("Role", &role_options(), role_idx),
            FormField::flag("Active", user.active),
        ],
        focused: 0,
    })
}

#[must_use]
pub fn item_add_modal() -> Modal {
    Modal::Form(FormModal {
        title: "Add item".to_string(),
        kind: FormKind::ItemAdd,
        fields: vec![
            FormField::text("Title", ""),
            FormField::text("Category", ""),
            FormField::text("Price/day", ""),
            FormField::text("Location", ""),
        ],
        focused: 0,
    })
}

#[must_use]
pub fn item_edit_modal(item: &Item) -> Modal {
    Modal::Form(FormModal {
        title: "Edit item".to_string(),
        kind: FormKind::ItemEdit(item.id),
        fields: vec![
            FormField::text("Title", &item.title),
            FormField::text("Category", &item.category),
            FormField::text("Price/day", &item.price.to_string()),
            FormField::text("Location", &item.location),
            FormField::flag("Active", item.active),
        ],
        focused: 0,
    })
}

#[must_use]
pub fn booking_status_modal(booking: &Booking) -> Modal {
    let options: Vec<&'static str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();
    let selected = BookingStatus::ALL
        .iter()
        .position(|s| *s == booking.status)
        .unwrap_or(0);
    Modal::Form(FormModal {
        title: format!("Booking #{}", booking.id),
        kind: FormKind::BookingStatus(booking.id),
        fields: vec![FormField::choice("Status", &options, selected)],
        focused: 0,
    })
}

#[must_use]
pub fn rating_modal(title: &str, current: u8) -> Modal {
    let selected = usize::from(current.clamp(1, 5)) - 1;
    Modal::Form(FormModal {
        title: format!("Rate {title}"),
        kind: FormKind::Rating(title.to_string()),
        fields: vec![FormField::choice(
            "Stars",
            &["1", "2", "3", "4", "5"],
            selected,
        )],
        focused: 0,
    })
}

/// The read-only booking card. `amount` is the joined item's daily price
/// times quantity; bookings whose item title no longer matches show "N/A".
#[must_use]
pub fn booking_info_modal(booking: &Booking, amount: Option<i64>) -> Modal {
    let amount = amount.map_or_else(|| "N/A".to_string(), format_peso);
    Modal::Info(InfoModal {
        title: format!("Booking #{}", booking.id),
        lines: vec![
            ("Item".to_string(), booking.item.clone()),
            ("User".to_string(), booking.user.clone()),
            (
                "Dates".to_string(),
                format!("{} → {}", booking.start, booking.end),
            ),
            ("Qty".to_string(), booking.qty.to_string()),
            ("Status".to_string(), booking.status.as_str().to_string()),
            ("Amount".to_string(), amount),
        ],
    })
}

#[must_use]
pub fn confirm_delete_user(id: u32) -> Modal {
    Modal::Confirm(ConfirmModal {
        title: "Delete user".to_string(),
        body: "Delete user? This is irreversible (mock).".to_string(),
        kind: ConfirmKind::DeleteUser(id),
    })
}

#[must_use]
pub fn confirm_delete_item(id: u32) -> Modal {
    Modal::Confirm(ConfirmModal {
        title: "Delete item".to_string(),
        body: "Delete item?".to_string(),
        kind: ConfirmKind::DeleteItem(id),
    })
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

pub fn apply_modal_input(modal: &mut Modal, event: KeyEvent) -> ModalOutcome {
    match modal {
        Modal::Form(form) => apply_form_input(form, event),
        Modal::Confirm(_) => match event.key {
            Key::Enter | Key::Char('y') => ModalOutcome::Submit,
            Key::Esc | Key::Char('n') => ModalOutcome::Cancel,
            _ => ModalOutcome::Pending,
        },
        Modal::Info(_) => match event.key {
            Key::Enter | Key::Esc | Key::Char('y') | Key::Char('n') => ModalOutcome::Cancel,
            _ => ModalOutcome::Pending,
        },
    }
}

fn apply_form_input(form: &mut FormModal, event: KeyEvent) -> ModalOutcome {
    let count = form.fields.len();
    match event.key {
        Key::Esc => return ModalOutcome::Cancel,
        Key::Enter => return ModalOutcome::Submit,
        Key::Tab | Key::Down => form.focused = (form.focused + 1) % count,
        Key::BackTab | Key::Up => {
            form.focused = form.focused.checked_sub(1).unwrap_or(count - 1);
        }
        _ => {
            if let Some(field) = form.fields.get_mut(form.focused) {
                field.apply_key(event.key);
            }
        }
    }
    ModalOutcome::Pending
}

// ---------------------------------------------------------------------------
// Payload extraction
// ---------------------------------------------------------------------------

/// Read a [`UserForm`] back out of the modal fields. The active flag is
/// absent on the add form; new users always start active.
#[must_use]
pub fn user_form(fields: &[FormField]) -> UserForm {
    let role = fields
        .get(2)
        .and_then(FormField::selected_option)
        .and_then(|s| Role::parse(s).ok())
        .unwrap_or_default();
    UserForm {
        name: fields.first().map(FormField::text_value).unwrap_or_default().to_string(),
        email: fields.get(1).map(FormField::text_value).unwrap_or_default().to_string(),
        role,
        active: fields.get(3).map_or(true, FormField::flag_value),
    }
}

#[must_use]
pub fn item_form(fields: &[FormField]) -> ItemForm {
    ItemForm {
        title: fields.first().map(FormField::text_value).unwrap_or_default().to_string(),
        category: fields.get(1).map(FormField::text_value).unwrap_or_default().to_string(),
        price: fields.get(2).map(FormField::text_value).unwrap_or_default().to_string(),
        location: fields.get(3).map(FormField::text_value).unwrap_or_default().to_string(),
        active: fields.get(4).map_or(true, FormField::flag_value),
    }
}

#[must_use]
pub fn chosen_status(fields: &[FormField]) -> BookingStatus {
    fields
        .first()
        .and_then(FormField::selected_option)
        .and_then(|s| BookingStatus::parse(s).ok())
        .unwrap_or(BookingStatus::Paid)
}

#[must_use]
pub fn chosen_stars(fields: &[FormField]) -> u8 {
    let selected = match fields.first().and_then(FormField::selected_option) {
        Some(option) => option.parse().unwrap_or(1),
        None => 1,
    };
    selected.clamp(1, 5)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render_modal(frame: &mut RenderFrame, modal: &Modal) {
    match modal {
        Modal::Form(form) => {
            let height = form.fields.len() as u16 + 4;
            let rect = centered_rect(frame.area(), MODAL_WIDTH, height);
            let inner = frame.draw_panel(rect, Some(&form.title), BorderStyle::Rounded);
            if inner.is_empty() {
                return;
            }
            let (body, hint) = inner.split_bottom(1);
            render_form(frame, body, &form.fields, form.focused);
            frame.draw_text(hint.x, hint.y, "Enter saves · Esc cancels", TextRole::Muted);
        }
        Modal::Confirm(confirm) => {
            let rect = centered_rect(frame.area(), MODAL_WIDTH, 5);
            let inner = frame.draw_panel(rect, Some(&confirm.title), BorderStyle::Rounded);
            if inner.is_empty() {
                return;
            }
            frame.draw_text_clipped(inner.x, inner.y, inner.width, &confirm.body, TextRole::Danger);
            frame.draw_text(
                inner.x,
                inner.y + 2,
                "Enter confirms · Esc cancels",
                TextRole::Muted,
            );
        }
        Modal::Info(info) => {
            let height = info.lines.len() as u16 + 4;
            let rect = centered_rect(frame.area(), MODAL_WIDTH, height);
            let inner = frame.draw_panel(rect, Some(&info.title), BorderStyle::Rounded);
            if inner.is_empty() {
                return;
            }
            for (offset, (label, value)) in info.lines.iter().enumerate() {
                frame.draw_text_clipped(
                    inner.x,
                    inner.y + offset as u16,
                    inner.width,
                    &format!("{label:<8} {value}"),
                    TextRole::Default,
                );
            }
            let (_, hint) = inner.split_bottom(1);
            frame.draw_text(hint.x, hint.y, "Esc closes", TextRole::Muted);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use rentease_core::seed;
    use rentease_tui_adapter::style::{Theme, ThemeKind};

    fn key(k: Key) -> KeyEvent {
        KeyEvent::plain(k)
    }

    #[test]
    fn edit_modal_prefills_user_fields() {
        let users = seed::users();
        let Modal::Form(form) = user_edit_modal(&users[1]) else {
            panic!("expected form modal");
        };
        assert_eq!(form.fields[0].text_value(), "Ben Cruz");
        assert_eq!(form.fields[1].text_value(), "ben@example.com");
        assert_eq!(form.fields[2].selected_option(), Some("renter"));
        assert!(form.fields[3].flag_value());
    }

    #[test]
    fn tab_cycles_and_typing_edits_the_focused_field() {
        let mut modal = user_add_modal();
        assert_eq!(apply_modal_input(&mut modal, key(Key::Char('D'))), ModalOutcome::Pending);
        assert_eq!(apply_modal_input(&mut modal, key(Key::Tab)), ModalOutcome::Pending);
        apply_modal_input(&mut modal, key(Key::Char('d')));
        apply_modal_input(&mut modal, key(Key::Char('@')));
        let Modal::Form(form) = &modal else {
            panic!("expected form modal");
        };
        assert_eq!(form.fields[0].text_value(), "D");
        assert_eq!(form.fields[1].text_value(), "d@");
        assert_eq!(form.focused, 1);
    }

    #[test]
    fn back_tab_wraps_to_the_last_field() {
        let mut modal = user_add_modal();
        apply_modal_input(&mut modal, key(Key::BackTab));
        let Modal::Form(form) = &modal else {
            panic!("expected form modal");
        };
        assert_eq!(form.focused, 2);
    }

    #[test]
    fn enter_submits_and_escape_cancels() {
        let mut modal = user_add_modal();
        assert_eq!(apply_modal_input(&mut modal, key(Key::Enter)), ModalOutcome::Submit);
        assert_eq!(apply_modal_input(&mut modal, key(Key::Esc)), ModalOutcome::Cancel);
    }

    #[test]
    fn user_form_extraction_defaults_active_on_add() {
        let Modal::Form(mut form) = user_add_modal() else {
            panic!("expected form modal");
        };
        for ch in "Dara".chars() {
            form.fields[0].apply_key(Key::Char(ch));
        }
        for ch in "d@x.ph".chars() {
            form.fields[1].apply_key(Key::Char(ch));
        }
        form.fields[2].apply_key(Key::Right);
        let payload = user_form(&form.fields);
        assert_eq!(payload.name, "Dara");
        assert_eq!(payload.email, "d@x.ph");
        assert_eq!(payload.role, Role::Renter);
        assert!(payload.active, "add form has no active field");
    }

    #[test]
    fn item_form_extraction_keeps_raw_price_text() {
        let items = seed::items();
        let Modal::Form(mut form) = item_edit_modal(&items[0]) else {
            panic!("expected form modal");
        };
        form.fields[2].apply_key(Key::Backspace);
        let payload = item_form(&form.fields);
        assert_eq!(payload.title, "City Sedan");
        assert_eq!(payload.price, "250", "price stays raw until the mutator parses it");
        assert!(payload.active);
    }

    #[test]
    fn booking_modal_preselects_current_status() {
        let bookings = seed::bookings();
        let Modal::Form(mut form) = booking_status_modal(&bookings[2]) else {
            panic!("expected form modal");
        };
        assert_eq!(chosen_status(&form.fields), BookingStatus::NotPaid);
        form.fields[0].apply_key(Key::Right);
        assert_eq!(chosen_status(&form.fields), BookingStatus::Cancelled);
    }

    #[test]
    fn rating_modal_maps_choice_to_stars() {
        let Modal::Form(mut form) = rating_modal("City Sedan", 0) else {
            panic!("expected form modal");
        };
        assert_eq!(chosen_stars(&form.fields), 1);
        form.fields[0].apply_key(Key::Right);
        form.fields[0].apply_key(Key::Right);
        assert_eq!(chosen_stars(&form.fields), 3);
    }

    #[test]
    fn confirm_bodies_warn_exactly() {
        let Modal::Confirm(confirm) = confirm_delete_user(7) else {
            panic!("expected confirm modal");
        };
        assert_eq!(confirm.body, "Delete user? This is irreversible (mock).");
        assert_eq!(confirm.kind, ConfirmKind::DeleteUser(7));

        let Modal::Confirm(confirm) = confirm_delete_item(2) else {
            panic!("expected confirm modal");
        };
        assert_eq!(confirm.body, "Delete item?");
    }

    #[test]
    fn booking_card_lists_the_join_and_amount() {
        let bookings = seed::bookings();
        let Modal::Info(info) = booking_info_modal(&bookings[0], Some(2500)) else {
            panic!("expected info modal");
        };
        assert_eq!(info.title, "Booking #1");
        assert_eq!(info.lines[0], ("Item".to_string(), "City Sedan".to_string()));
        assert_eq!(info.lines[5], ("Amount".to_string(), "₱2,500".to_string()));

        let Modal::Info(info) = booking_info_modal(&bookings[0], None) else {
            panic!("expected info modal");
        };
        assert_eq!(info.lines[5].1, "N/A", "orphaned titles have no amount");
    }

    #[test]
    fn info_card_closes_on_any_dismissal_key() {
        for k in [Key::Enter, Key::Esc, Key::Char('y'), Key::Char('n')] {
            let mut modal = booking_info_modal(&seed::bookings()[0], Some(2500));
            assert_eq!(apply_modal_input(&mut modal, key(k)), ModalOutcome::Cancel);
        }
        let mut modal = booking_info_modal(&seed::bookings()[0], Some(2500));
        assert_eq!(apply_modal_input(&mut modal, key(Key::Char('x'))), ModalOutcome::Pending);
    }

    #[test]
    fn confirm_keys_resolve_directly() {
        let mut modal = confirm_delete_user(1);
        assert_eq!(apply_modal_input(&mut modal, key(Key::Char('y'))), ModalOutcome::Submit);
        assert_eq!(apply_modal_input(&mut modal, key(Key::Char('n'))), ModalOutcome::Cancel);
        assert_eq!(apply_modal_input(&mut modal, key(Key::Char('z'))), ModalOutcome::Pending);
    }

    #[test]
    fn modal_renders_centered_over_the_frame() {
        let mut frame = RenderFrame::new(80, 24, Theme::for_kind(ThemeKind::Dark));
        let modal = user_edit_modal(&seed::users()[0]);
        render_modal(&mut frame, &modal);
        let snapshot = frame.snapshot();
        assert!(snapshot.contains("Edit user"));
        assert!(snapshot.contains("Alice Ramos"));
        assert!(snapshot.contains("Enter saves"));
        assert_eq!(frame.row_text(0), "", "top row stays clear of the modal");
    }
}
