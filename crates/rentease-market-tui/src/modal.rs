//! Single-slot modal controller for the storefront: a listing detail card,
//! the booking form, and the review form. Submitting hands a typed payload
//! back to the app, which runs the mutator and decides whether the modal
//! closes.

use rentease_core::model::Listing;
use rentease_core::stats::format_peso;
use rentease_tui_adapter::input::{Key, KeyEvent};
use rentease_tui_adapter::render::RenderFrame;
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{centered_rect, render_form, BorderStyle, FormField};

const MODAL_WIDTH: u16 = 46;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    /// Carries the listing title being booked.
    Booking(String),
    /// Carries the rental title being reviewed.
    Review(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModal {
    pub title: String,
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailModal {
    pub listing: Listing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Form(FormModal),
    Detail(DetailModal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Pending,
    Submit,
    Cancel,
    /// The detail card's book key; carries the listing title so the app can
    /// swap in the booking form.
    Book(String),
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

#[must_use]
pub fn booking_modal(title: &str) -> Modal {
    Modal::Form(FormModal {
        title: format!("Book {title}"),
        kind: FormKind::Booking(title.to_string()),
        fields: vec![
            FormField::text("Start (YYYY-MM-DD)", ""),
            FormField::text("End (YYYY-MM-DD)", ""),
            FormField::text("Quantity", "1"),
        ],
        focused: 0,
    })
}

#[must_use]
pub fn review_modal(title: &str, existing: Option<&str>) -> Modal {
    Modal::Form(FormModal {
        title: format!("Review {title}"),
        kind: FormKind::Review(title.to_string()),
        fields: vec![FormField::text("Review", existing.unwrap_or(""))],
        focused: 0,
    })
}

#[must_use]
pub fn detail_modal(listing: &Listing) -> Modal {
    Modal::Detail(DetailModal {
        listing: listing.clone(),
    })
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

pub fn apply_modal_input(modal: &mut Modal, event: KeyEvent) -> ModalOutcome {
    match modal {
        Modal::Form(form) => apply_form_input(form, event),
        Modal::Detail(detail) => match event.key {
            Key::Char('b') => ModalOutcome::Book(detail.listing.title.clone()),
            Key::Esc | Key::Enter => ModalOutcome::Cancel,
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

/// Start, end, and the raw quantity text. Dates stay raw too; the mutator
/// rejects blanks and parses the quantity.
#[must_use]
pub fn rental_request(fields: &[FormField]) -> (String, String, String) {
    let start = fields.first().map(FormField::text_value).unwrap_or_default();
    let end = fields.get(1).map(FormField::text_value).unwrap_or_default();
    let quantity = fields.get(2).map(FormField::text_value).unwrap_or_default();
    (start.to_string(), end.to_string(), quantity.to_string())
}

#[must_use]
pub fn review_text(fields: &[FormField]) -> String {
    fields
        .first()
        .map(FormField::text_value)
        .unwrap_or_default()
        .to_string()
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
            frame.draw_text(hint.x, hint.y, "Enter submits · Esc cancels", TextRole::Muted);
        }
        Modal::Detail(detail) => render_detail(frame, &detail.listing),
    }
}

fn render_detail(frame: &mut RenderFrame, listing: &Listing) {
    let rect = centered_rect(frame.area(), MODAL_WIDTH, 8);
    let inner = frame.draw_panel(rect, Some(&listing.title), BorderStyle::Rounded);
    if inner.is_empty() {
        return;
    }
    let rows = [
        format!("Location   {}", listing.location),
        format!("Price/day  {}", format_peso(listing.price)),
        format!("Kind       {}", listing.kind),
    ];
    for (offset, row) in rows.iter().enumerate() {
        frame.draw_text_clipped(inner.x, inner.y + offset as u16, inner.width, row, TextRole::Default);
    }
    frame.draw_text_clipped(
        inner.x,
        inner.y + 4,
        inner.width,
        &listing.description,
        TextRole::Muted,
    );
    frame.draw_text(
        inner.x,
        inner.y + 5,
        "b books · Esc closes",
        TextRole::Muted,
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use rentease_core::seed;
    use rentease_core::model::Category;
    use rentease_tui_adapter::style::{Theme, ThemeKind};

    fn key(k: Key) -> KeyEvent {
        KeyEvent::plain(k)
    }

    fn first_property() -> Listing {
        seed::catalog(Category::Property).remove(0)
    }

    #[test]
    fn booking_modal_collects_dates_and_quantity() {
        let Modal::Form(mut form) = booking_modal("Cozy 1BR near BGC") else {
            panic!("expected form modal");
        };
        assert_eq!(form.title, "Book Cozy 1BR near BGC");
        for ch in "2025-09-01".chars() {
            form.fields[0].apply_key(Key::Char(ch));
        }
        for ch in "2025-09-05".chars() {
            form.fields[1].apply_key(Key::Char(ch));
        }
        form.fields[2].apply_key(Key::Char('2'));
        let (start, end, quantity) = rental_request(&form.fields);
        assert_eq!(start, "2025-09-01");
        assert_eq!(end, "2025-09-05");
        assert_eq!(quantity, "12", "quantity starts prefilled at 1");
    }

    #[test]
    fn review_modal_prefills_existing_text() {
        let Modal::Form(form) = review_modal("Old Drill", Some("Worked great")) else {
            panic!("expected form modal");
        };
        assert_eq!(form.title, "Review Old Drill");
        assert_eq!(review_text(&form.fields), "Worked great");

        let Modal::Form(form) = review_modal("Old Drill", None) else {
            panic!("expected form modal");
        };
        assert_eq!(review_text(&form.fields), "");
    }

    #[test]
    fn detail_card_books_or_closes() {
        let mut modal = detail_modal(&first_property());
        assert_eq!(apply_modal_input(&mut modal, key(Key::Char('x'))), ModalOutcome::Pending);
        assert_eq!(
            apply_modal_input(&mut modal, key(Key::Char('b'))),
            ModalOutcome::Book("Cozy 1BR near BGC".to_string())
        );
        assert_eq!(apply_modal_input(&mut modal, key(Key::Enter)), ModalOutcome::Cancel);
        assert_eq!(apply_modal_input(&mut modal, key(Key::Esc)), ModalOutcome::Cancel);
    }

    #[test]
    fn tab_cycles_booking_fields() {
        let mut modal = booking_modal("x");
        apply_modal_input(&mut modal, key(Key::Tab));
        apply_modal_input(&mut modal, key(Key::Tab));
        apply_modal_input(&mut modal, key(Key::Tab));
        let Modal::Form(form) = &modal else {
            panic!("expected form modal");
        };
        assert_eq!(form.focused, 0, "tab wraps around three fields");
    }

    #[test]
    fn detail_renders_price_and_description() {
        let mut frame = RenderFrame::new(80, 24, Theme::for_kind(ThemeKind::Dark));
        render_modal(&mut frame, &detail_modal(&first_property()));
        let snapshot = frame.snapshot();
        assert!(snapshot.contains("Cozy 1BR near BGC"));
        assert!(snapshot.contains("₱28,000"));
        assert!(snapshot.contains("b books · Esc closes"));
    }
}
