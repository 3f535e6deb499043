#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Whole-app flows: keystrokes in, persisted JSON and log lines out.

use rentease_admin_tui::app::{App, Command, ViewId};
use rentease_admin_tui::modal::Modal;
use rentease_core::model::{Booking, BookingStatus, Item, Role, SettingKey, User};
use rentease_core::state;
use rentease_core::store::Store;
use rentease_tui_adapter::input::{InputEvent, Key, KeyEvent};
use rentease_tui_adapter::render::RenderFrame;
use rentease_tui_adapter::style::{Theme, ThemeKind};

fn open_app() -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path()).expect("open store");
    let app = App::new(store).expect("new app");
    (dir, app)
}

fn probe(dir: &tempfile::TempDir) -> Store {
    Store::open(dir.path()).expect("probe store")
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

fn log_texts(store: &Store) -> Vec<String> {
    state::load_logs(store)
        .expect("load logs")
        .into_iter()
        .map(|entry| entry.text)
        .collect()
}

#[test]
fn add_user_modal_flow_persists_to_disk() {
    let (dir, mut app) = open_app();
    press(&mut app, '2');
    press(&mut app, 'a');
    assert!(app.modal().is_some());

    let mut frame = RenderFrame::new(80, 24, Theme::for_kind(ThemeKind::Dark));
    app.render(&mut frame);
    assert!(frame.snapshot().contains("Add user"));

    type_text(&mut app, "Dara Lim");
    press_key(&mut app, Key::Tab);
    type_text(&mut app, "dara@example.com");
    press_key(&mut app, Key::Enter);

    assert!(app.modal().is_none());
    assert!(app.notice().is_none());
    let added = app.state().users.last().expect("added user");
    assert_eq!(added.id, 4);
    assert_eq!(added.name, "Dara Lim");
    assert_eq!(added.role, Role::User);
    assert!(added.active);

    let saved: Vec<User> = probe(&dir)
        .read_json("admin_users")
        .expect("read users")
        .expect("users present");
    assert_eq!(saved.len(), 4);
    assert_eq!(saved[3].email, "dara@example.com");
    assert_eq!(
        log_texts(&probe(&dir)).last().map(String::as_str),
        Some("Added user dara@example.com")
    );
}

#[test]
fn blank_user_form_stays_open_until_corrected() {
    let (dir, mut app) = open_app();
    press(&mut app, '2');
    press(&mut app, 'a');
    press_key(&mut app, Key::Enter);

    assert!(app.modal().is_some(), "validation keeps the form open");
    assert_eq!(
        app.notice().map(|n| n.text.as_str()),
        Some("Name and email required")
    );
    assert_eq!(app.state().users.len(), 3);
    assert_eq!(log_texts(&probe(&dir)).len(), 1, "only the startup line");

    type_text(&mut app, "Dara");
    press_key(&mut app, Key::Tab);
    type_text(&mut app, "dara@example.com");
    press_key(&mut app, Key::Enter);

    assert!(app.modal().is_none());
    assert_eq!(app.state().users.len(), 4);
}

#[test]
fn delete_user_requires_confirmation() {
    let (dir, mut app) = open_app();
    press(&mut app, '2');
    press_key(&mut app, Key::Down);
    press(&mut app, 'x');

    let Some(Modal::Confirm(confirm)) = app.modal() else {
        panic!("expected confirm modal");
    };
    assert_eq!(confirm.body, "Delete user? This is irreversible (mock).");

    press_key(&mut app, Key::Enter);
    let ids: Vec<u32> = app.state().users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let saved: Vec<User> = probe(&dir)
        .read_json("admin_users")
        .expect("read users")
        .expect("users present");
    assert_eq!(saved.len(), 2);
    assert!(log_texts(&probe(&dir)).contains(&"Deleted user ben@example.com".to_string()));
}

#[test]
fn cancelled_confirm_leaves_data_alone() {
    let (dir, mut app) = open_app();
    press(&mut app, '3');
    press(&mut app, 'x');
    assert!(app.modal().is_some());
    press(&mut app, 'n');

    assert!(app.modal().is_none());
    assert_eq!(app.state().items.len(), 3);
    assert!(log_texts(&probe(&dir))
        .iter()
        .all(|line| !line.starts_with("Deleted item")));
}

#[test]
fn edit_item_price_via_modal() {
    let (dir, mut app) = open_app();
    press(&mut app, '3');
    press(&mut app, 'e');
    press_key(&mut app, Key::Tab);
    press_key(&mut app, Key::Tab);
    for _ in 0..4 {
        press_key(&mut app, Key::Backspace);
    }
    type_text(&mut app, "3100");
    press_key(&mut app, Key::Enter);

    assert_eq!(app.state().items[0].price, 3100);
    let saved: Vec<Item> = probe(&dir)
        .read_json("admin_items")
        .expect("read items")
        .expect("items present");
    assert_eq!(saved[0].price, 3100);
    assert_eq!(
        log_texts(&probe(&dir)).last().map(String::as_str),
        Some("Item edited: City Sedan")
    );
}

#[test]
fn booking_status_modal_cycles_and_logs() {
    let (dir, mut app) = open_app();
    press(&mut app, '4');
    press(&mut app, 's');
    assert!(app.modal().is_some());
    press_key(&mut app, Key::Right);
    press_key(&mut app, Key::Enter);

    assert_eq!(app.state().bookings[0].status, BookingStatus::NotPaid);
    let saved: Vec<Booking> = probe(&dir)
        .read_json("admin_bookings")
        .expect("read bookings")
        .expect("bookings present");
    assert_eq!(saved[0].status, BookingStatus::NotPaid);
    assert_eq!(
        log_texts(&probe(&dir)).last().map(String::as_str),
        Some("Booking 1 set to Not Paid")
    );
}

#[test]
fn booking_view_card_shows_the_computed_amount() {
    let (dir, mut app) = open_app();
    press(&mut app, '4');
    press(&mut app, 'v');
    assert!(matches!(app.modal(), Some(Modal::Info(_))));

    let mut frame = RenderFrame::new(80, 24, Theme::for_kind(ThemeKind::Dark));
    app.render(&mut frame);
    let snapshot = frame.snapshot();
    assert!(snapshot.contains("Booking #1"));
    assert!(snapshot.contains("City Sedan"));
    assert!(snapshot.contains("₱2,500"), "daily price times quantity");

    press_key(&mut app, Key::Enter);
    assert!(app.modal().is_none());
    // Viewing writes nothing and logs nothing.
    assert_eq!(log_texts(&probe(&dir)).len(), 1);
}

#[test]
fn csv_export_lands_in_the_store_directory() {
    let (dir, mut app) = open_app();
    press(&mut app, '4');
    press(&mut app, 'c');

    let csv = std::fs::read_to_string(dir.path().join("bookings.csv")).expect("csv file");
    let expected = "id,item,user,start,end,qty,status\n\
                    1,City Sedan,alice@example.com,2025-08-10,2025-08-11,1,Paid\n\
                    2,Sunny Residences,ben@example.com,2025-08-01,2025-08-31,1,Paid\n\
                    3,Power Drill,alice@example.com,2025-07-15,2025-07-15,1,Not Paid";
    assert_eq!(csv, expected);

    let notice = app.notice().expect("export notice");
    assert!(notice.text.starts_with("Exported "));
    assert!(notice.text.ends_with("bookings.csv"));
}

#[test]
fn setting_toggle_persists_per_key() {
    let (dir, mut app) = open_app();
    press(&mut app, '5');
    press(&mut app, ' ');

    assert!(app.state().settings.get(SettingKey::Maintenance));
    assert_eq!(
        probe(&dir)
            .read_json::<bool>("setting-maintenance")
            .expect("read"),
        Some(true)
    );
    assert_eq!(
        log_texts(&probe(&dir)).last().map(String::as_str),
        Some("Setting setting-maintenance set to true")
    );

    press(&mut app, ' ');
    assert_eq!(
        probe(&dir)
            .read_json::<bool>("setting-maintenance")
            .expect("read"),
        Some(false)
    );
}

#[test]
fn rating_a_completed_rental_from_history() {
    let (dir, mut app) = open_app();
    app.set_today("2025-08-20");
    press(&mut app, '7');
    assert_eq!(app.view(), ViewId::History);
    press_key(&mut app, Key::Enter);

    let Some(Modal::Form(form)) = app.modal() else {
        panic!("expected rating modal");
    };
    assert_eq!(form.title, "Rate City Sedan");

    for _ in 0..3 {
        press_key(&mut app, Key::Right);
    }
    press_key(&mut app, Key::Enter);

    assert_eq!(app.state().ratings.get("City Sedan"), Some(&4));
    let saved: std::collections::BTreeMap<String, u8> = probe(&dir)
        .read_json("admin_reviews")
        .expect("read ratings")
        .expect("ratings present");
    assert_eq!(saved.get("City Sedan"), Some(&4));
    assert!(log_texts(&probe(&dir)).contains(&"Rating set for City Sedan: 4 stars".to_string()));
}

#[test]
fn restart_sees_previous_sessions_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let store = Store::open(dir.path()).expect("open store");
        let mut app = App::new(store).expect("new app");
        press(&mut app, '2');
        press(&mut app, 'a');
        type_text(&mut app, "Dara");
        press_key(&mut app, Key::Tab);
        type_text(&mut app, "dara@example.com");
        press_key(&mut app, Key::Enter);
    }

    let store = Store::open(dir.path()).expect("reopen store");
    let app = App::new(store).expect("second app");
    assert_eq!(app.state().users.len(), 4);
    let logs = log_texts(&probe(&dir));
    assert_eq!(
        logs.iter()
            .filter(|line| line.as_str() == "Admin UI initialized")
            .count(),
        2,
        "each launch logs its own startup line"
    );
}
