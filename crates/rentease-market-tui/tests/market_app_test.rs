//! Whole-app flows for the storefront: keystrokes in, persisted JSON out.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::BTreeMap;

use rentease_core::model::{Rental, User};
use rentease_core::store::Store;
use rentease_market_tui::app::{App, Command};
use rentease_market_tui::listings::REFRESH_DELAY_TICKS;
use rentease_market_tui::modal::Modal;
use rentease_tui_adapter::input::{InputEvent, Key, KeyEvent};
use rentease_tui_adapter::render::RenderFrame;
use rentease_tui_adapter::style::{Theme, ThemeKind};
use tempfile::TempDir;

fn open_app() -> (TempDir, App) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path()).expect("open store");
    let app = App::new(store).expect("app");
    (dir, app)
}

/// Second handle onto the same directory, for reading what the app wrote.
fn probe(dir: &TempDir) -> Store {
    Store::open(dir.path()).expect("probe store")
}

fn settle(app: &mut App) {
    for _ in 0..REFRESH_DELAY_TICKS {
        app.handle_event(InputEvent::Tick);
    }
}

fn press(app: &mut App, ch: char) -> Command {
    app.handle_event(InputEvent::Key(KeyEvent::plain(Key::Char(ch))))
}

fn press_key(app: &mut App, key: Key) -> Command {
    app.handle_event(InputEvent::Key(KeyEvent::plain(key)))
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, ch);
    }
}

fn render(app: &App) -> String {
    let mut frame = RenderFrame::new(100, 30, Theme::for_kind(ThemeKind::Dark));
    app.render(&mut frame);
    frame.snapshot()
}

#[test]
fn booking_flow_persists_to_disk() {
    let (dir, mut app) = open_app();
    settle(&mut app);

    press(&mut app, 'b');
    assert!(render(&app).contains("Book Cozy 1BR near BGC"));
    type_text(&mut app, "2099-01-01");
    press_key(&mut app, Key::Tab);
    type_text(&mut app, "2099-01-05");
    press_key(&mut app, Key::Tab);
    press_key(&mut app, Key::Backspace);
    press(&mut app, '2');
    press_key(&mut app, Key::Enter);

    assert!(app.modal().is_none());
    let notice = app.notice().expect("confirmation notice");
    assert_eq!(notice.text, "Booking confirmed!");

    let expected = Rental {
        title: "Cozy 1BR near BGC".to_string(),
        start: "2099-01-01".to_string(),
        end: "2099-01-05".to_string(),
        quantity: 2,
    };
    assert_eq!(app.state().rentals, vec![expected.clone()]);
    let on_disk: Vec<Rental> = probe(&dir)
        .read_json("bookings")
        .expect("read bookings")
        .expect("bookings written");
    assert_eq!(on_disk, vec![expected]);

    // The storefront never hydrates or writes the admin collections, even
    // though both apps share one store directory.
    let users: Option<Vec<User>> = probe(&dir).read_json("admin_users").expect("read users");
    assert!(users.is_none());

    press(&mut app, '2');
    let rows = app.rentals_vm().rows();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].completed, "a 2099 rental is still active");
    assert_eq!(rows[0].quantity, 2);
}

#[test]
fn blank_dates_keep_the_booking_form_open() {
    let (dir, mut app) = open_app();
    settle(&mut app);

    press(&mut app, 'b');
    press_key(&mut app, Key::Enter);
    assert_eq!(
        app.notice().expect("validation notice").text,
        "Select start and end dates"
    );
    assert!(
        matches!(app.modal(), Some(Modal::Form(_))),
        "validation failure keeps the form open"
    );
    let on_disk: Option<Vec<Rental>> = probe(&dir).read_json("bookings").expect("read bookings");
    assert!(on_disk.is_none());

    type_text(&mut app, "2099-02-01");
    press_key(&mut app, Key::Tab);
    type_text(&mut app, "2099-02-03");
    press_key(&mut app, Key::Enter);
    assert!(app.modal().is_none());
    assert_eq!(app.state().rentals.len(), 1);
    assert_eq!(app.state().rentals[0].quantity, 1, "quantity left at its default");
}

#[test]
fn favorite_toggle_round_trips_to_disk() {
    let (dir, mut app) = open_app();
    settle(&mut app);

    press(&mut app, 'f');
    let favorites: Vec<u32> = probe(&dir)
        .read_json("favorites")
        .expect("read favorites")
        .expect("favorites written");
    assert_eq!(favorites, vec![1]);

    settle(&mut app);
    press(&mut app, 'f');
    let favorites: Vec<u32> = probe(&dir)
        .read_json("favorites")
        .expect("read favorites")
        .expect("favorites written");
    assert!(favorites.is_empty());
}

#[test]
fn review_overwrites_previous_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path()).expect("open store");
    store
        .write_json(
            "bookings",
            &vec![Rental {
                title: "Old Drill".to_string(),
                start: "2020-01-01".to_string(),
                end: "2020-01-05".to_string(),
                quantity: 1,
            }],
        )
        .expect("seed rentals");
    store
        .write_json(
            "reviews",
            &BTreeMap::from([("Old Drill".to_string(), "ok".to_string())]),
        )
        .expect("seed reviews");

    let mut app = App::new(store).expect("app");
    press(&mut app, '2');
    assert!(app.rentals_vm().rows()[0].completed, "a 2020 rental is history");

    press_key(&mut app, Key::Enter);
    assert!(render(&app).contains("Review Old Drill"));
    press_key(&mut app, Key::Backspace);
    press_key(&mut app, Key::Backspace);
    type_text(&mut app, "Worked great");
    press_key(&mut app, Key::Enter);

    assert!(app.modal().is_none());
    let reviews: BTreeMap<String, String> = probe(&dir)
        .read_json("reviews")
        .expect("read reviews")
        .expect("reviews written");
    assert_eq!(reviews.get("Old Drill").map(String::as_str), Some("Worked great"));
    assert_eq!(
        app.rentals_vm().rows()[0].review.as_deref(),
        Some("Worked great"),
        "history row picks up the new text"
    );
}

#[test]
fn restart_sees_previous_sessions_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let store = Store::open(dir.path()).expect("open store");
        let mut app = App::new(store).expect("app");
        settle(&mut app);
        press(&mut app, 'f');
        press(&mut app, 'b');
        type_text(&mut app, "2099-03-01");
        press_key(&mut app, Key::Tab);
        type_text(&mut app, "2099-03-02");
        press_key(&mut app, Key::Enter);
    }

    let store = Store::open(dir.path()).expect("reopen store");
    let app = App::new(store).expect("second app");
    assert!(app.state().is_favorite(1));
    assert_eq!(app.state().rentals.len(), 1);
    assert_eq!(app.rentals_vm().rows().len(), 1);
}
