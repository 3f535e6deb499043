//! Admin app shell: view routing, global search, modal dispatch, and the
//! frame layout around the active view.

use rentease_core::export;
use rentease_core::model::SettingKey;
use rentease_core::state::{self, AdminState};
use rentease_core::store::{Store, StoreError};
use rentease_core::today_str;
use rentease_tui_adapter::input::{translate_nav, InputEvent, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;

use crate::bookings::{self, BookingsVm};
use crate::history::{self, HistoryVm};
use crate::items::{self, ItemsVm};
use crate::logs::{self, LogsVm};
use crate::modal::{
    self, apply_modal_input, render_modal, ConfirmKind, FormKind, Modal, ModalOutcome,
};
use crate::overview::{self, OverviewVm};
use crate::settings::{self, SettingsVm};
use crate::users::{self, UsersVm};

/// Tabs of the admin console, in hotkey order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Overview,
    Users,
    Items,
    Bookings,
    Settings,
    Logs,
    History,
}

impl ViewId {
    pub const ALL: [ViewId; 7] = [
        ViewId::Overview,
        ViewId::Users,
        ViewId::Items,
        ViewId::Bookings,
        ViewId::Settings,
        ViewId::Logs,
        ViewId::History,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewId::Overview => "Overview",
            ViewId::Users => "Users",
            ViewId::Items => "Items",
            ViewId::Bookings => "Bookings",
            ViewId::Settings => "Settings",
            ViewId::Logs => "Logs",
            ViewId::History => "History",
        }
    }

    #[must_use]
    pub fn for_hotkey(ch: char) -> Option<Self> {
        let idx = usize::try_from(u32::from(ch).checked_sub(u32::from('1'))?).ok()?;
        Self::ALL.get(idx).copied()
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
}

/// Work a view hands back to the app instead of mutating state itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    OpenUserAdd,
    OpenUserEdit(u32),
    ToggleUser(u32),
    ConfirmDeleteUser(u32),
    OpenItemAdd,
    OpenItemEdit(u32),
    ToggleItem(u32),
    ConfirmDeleteItem(u32),
    OpenBookingStatus(u32),
    ViewBooking(u32),
    ExportCsv,
    SetSetting(SettingKey, bool),
    OpenRating { title: String, current: u8 },
}

/// One-line status message shown in the footer until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub role: TextRole,
}

impl Notice {
    fn success(text: String) -> Self {
        Self {
            text,
            role: TextRole::Success,
        }
    }

    fn danger(text: String) -> Self {
        Self {
            text,
            role: TextRole::Danger,
        }
    }
}

pub struct App {
    store: Store,
    state: AdminState,
    view: ViewId,
    today: String,
    notice: Option<Notice>,
    modal: Option<Modal>,
    search_active: bool,
    search_query: String,
    overview: OverviewVm,
    users: UsersVm,
    items: ItemsVm,
    bookings: BookingsVm,
    settings: SettingsVm,
    logs: LogsVm,
    history: HistoryVm,
}

impl App {
    pub fn new(store: Store) -> Result<Self, StoreError> {
        let state = AdminState::hydrate(&store)?;
        state::add_log(&store, "Admin UI initialized")?;
        let mut app = Self {
            store,
            state,
            view: ViewId::Overview,
            today: today_str(),
            notice: None,
            modal: None,
            search_active: false,
            search_query: String::new(),
            overview: OverviewVm::default(),
            users: UsersVm::default(),
            items: ItemsVm::default(),
            bookings: BookingsVm::default(),
            settings: SettingsVm::default(),
            logs: LogsVm::default(),
            history: HistoryVm::default(),
        };
        app.refresh_views()?;
        Ok(app)
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    #[must_use]
    pub fn state(&self) -> &AdminState {
        &self.state
    }

    #[must_use]
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn users_vm(&self) -> &UsersVm {
        &self.users
    }

    #[must_use]
    pub fn items_vm(&self) -> &ItemsVm {
        &self.items
    }

    #[must_use]
    pub fn bookings_vm(&self) -> &BookingsVm {
        &self.bookings
    }

    #[must_use]
    pub fn today(&self) -> &str {
        &self.today
    }

    /// Pin the date used for upcoming/history cutoffs and recompute the
    /// derived views. The tick handler calls this with the real clock.
    pub fn set_today(&mut self, today: &str) {
        if self.today != today {
            self.today = today.to_string();
            self.overview.refresh(&self.state, &self.today);
            self.history.set_rows(&self.state, &self.today);
        }
    }

    fn refresh_views(&mut self) -> Result<(), StoreError> {
        self.overview.refresh(&self.state, &self.today);
        self.users.set_rows(&self.state.users);
        self.items.set_rows(&self.state.items);
        self.bookings.set_rows(&self.state.bookings);
        self.history.set_rows(&self.state, &self.today);
        self.logs.set_entries(state::load_logs(&self.store)?);
        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::Tick => {
                self.set_today(&today_str());
                Command::None
            }
            InputEvent::Resize(_, _) => Command::None,
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command {
        if let Some(active) = self.modal.as_mut() {
            match apply_modal_input(active, key) {
                ModalOutcome::Pending => {}
                ModalOutcome::Cancel => self.modal = None,
                ModalOutcome::Submit => self.submit_modal(),
            }
            return Command::None;
        }

        if self.search_active {
            self.handle_search_key(key);
            return Command::None;
        }

        // A view editing its filter owns the keyboard.
        let capturing = match self.view {
            ViewId::Users => self.users.editing_filter(),
            ViewId::Items => self.items.editing_filter(),
            ViewId::Bookings => self.bookings.editing_filter(),
            _ => false,
        };
        if !capturing {
            if key.is_char('q') || (key.modifiers.ctrl && key.key == Key::Char('c')) {
                return Command::Quit;
            }
            if key.is_char('/') {
                self.search_active = true;
                self.search_query.clear();
                return Command::None;
            }
            if let Key::Char(ch) = key.key {
                if let Some(view) = ViewId::for_hotkey(ch) {
                    self.view = view;
                    return Command::None;
                }
            }
            // Horizontal navigation cycles tabs; no view uses it for rows.
            match translate_nav(key) {
                Some(UiAction::MoveLeft) => {
                    self.view = self.view.prev();
                    return Command::None;
                }
                Some(UiAction::MoveRight) => {
                    self.view = self.view.next();
                    return Command::None;
                }
                _ => {}
            }
        }

        let request = match self.view {
            ViewId::Overview => None,
            ViewId::Users => users::apply_users_input(&mut self.users, &self.state.users, key),
            ViewId::Items => items::apply_items_input(&mut self.items, &self.state.items, key),
            ViewId::Bookings => {
                bookings::apply_bookings_input(&mut self.bookings, &self.state.bookings, key)
            }
            ViewId::Settings => {
                settings::apply_settings_input(&mut self.settings, &self.state.settings, key)
            }
            ViewId::Logs => {
                logs::apply_logs_input(&mut self.logs, key);
                None
            }
            ViewId::History => history::apply_history_input(&mut self.history, key),
        };
        if let Some(request) = request {
            self.perform(request);
        }
        Command::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.key {
            Key::Esc => {
                self.search_active = false;
                self.search_query.clear();
            }
            Key::Enter => self.search_active = false,
            Key::Backspace => {
                self.search_query.pop();
                self.run_search();
            }
            Key::Char(ch) if !key.modifiers.ctrl && !key.modifiers.alt => {
                self.search_query.push(ch);
                self.run_search();
            }
            _ => {}
        }
    }

    /// Jump to the first collection with a hit and install the query as that
    /// view's filter. Users win over items, items over bookings. Queries
    /// under two characters are ignored. The jump check is narrower than the
    /// view filters: users by name/email, items by title, bookings by
    /// item/user.
    fn run_search(&mut self) {
        let query = self.search_query.trim().to_string();
        if query.chars().count() < 2 {
            return;
        }
        let needle = query.to_lowercase();
        let user_hit = self.state.users.iter().any(|u| {
            u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        });
        if user_hit {
            self.view = ViewId::Users;
            self.users.install_filter(&query, &self.state.users);
            return;
        }
        if self
            .state
            .items
            .iter()
            .any(|i| i.title.to_lowercase().contains(&needle))
        {
            self.view = ViewId::Items;
            self.items.install_filter(&query, &self.state.items);
            return;
        }
        let booking_hit = self.state.bookings.iter().any(|b| {
            b.item.to_lowercase().contains(&needle) || b.user.to_lowercase().contains(&needle)
        });
        if booking_hit {
            self.view = ViewId::Bookings;
            self.bookings.install_filter(&query, &self.state.bookings);
        }
    }

    fn perform(&mut self, request: Request) {
        let result = match request {
            Request::OpenUserAdd => {
                self.modal = Some(modal::user_add_modal());
                Ok(())
            }
            Request::OpenUserEdit(id) => {
                if let Some(user) = self.state.users.iter().find(|u| u.id == id) {
                    self.modal = Some(modal::user_edit_modal(user));
                }
                Ok(())
            }
            Request::ToggleUser(id) => self.state.toggle_user(&self.store, id).map(|_| ()),
            Request::ConfirmDeleteUser(id) => {
                self.modal = Some(modal::confirm_delete_user(id));
                Ok(())
            }
            Request::OpenItemAdd => {
                self.modal = Some(modal::item_add_modal());
                Ok(())
            }
            Request::OpenItemEdit(id) => {
                if let Some(item) = self.state.items.iter().find(|i| i.id == id) {
                    self.modal = Some(modal::item_edit_modal(item));
                }
                Ok(())
            }
            Request::ToggleItem(id) => self.state.toggle_item(&self.store, id).map(|_| ()),
            Request::ConfirmDeleteItem(id) => {
                self.modal = Some(modal::confirm_delete_item(id));
                Ok(())
            }
            Request::OpenBookingStatus(id) => {
                if let Some(booking) = self.state.bookings.iter().find(|b| b.id == id) {
                    self.modal = Some(modal::booking_status_modal(booking));
                }
                Ok(())
            }
            Request::ViewBooking(id) => {
                if let Some(booking) = self.state.bookings.iter().find(|b| b.id == id) {
                    let amount = self
                        .state
                        .find_item_by_title(&booking.item)
                        .map(|item| item.price * i64::from(booking.qty));
                    self.modal = Some(modal::booking_info_modal(booking, amount));
                }
                Ok(())
            }
            Request::ExportCsv => export::write_bookings_csv(&self.store, &self.state.bookings)
                .map(|path| {
                    self.notice = Some(Notice::success(format!("Exported {}", path.display())));
                }),
            Request::SetSetting(key, value) => {
                self.state.set_setting(&self.store, key, value)
            }
            Request::OpenRating { title, current } => {
                self.modal = Some(modal::rating_modal(&title, current));
                Ok(())
            }
        };
        if let Err(err) = result.and_then(|()| self.refresh_views()) {
            self.notice = Some(Notice::danger(error_text(err)));
        }
    }

    /// Run the mutator behind the open modal. Validation failures keep the
    /// modal open for correction; anything else surfaces as a save error
    /// with the modal closed.
    fn submit_modal(&mut self) {
        let Some(active) = self.modal.take() else {
            return;
        };
        let result = match &active {
            Modal::Form(form) => match &form.kind {
                FormKind::UserAdd => self
                    .state
                    .add_user(&self.store, &modal::user_form(&form.fields))
                    .map(|_| ()),
                FormKind::UserEdit(id) => {
                    self.state
                        .edit_user(&self.store, *id, &modal::user_form(&form.fields))
                }
                FormKind::ItemAdd => self
                    .state
                    .add_item(&self.store, &modal::item_form(&form.fields))
                    .map(|_| ()),
                FormKind::ItemEdit(id) => {
                    self.state
                        .edit_item(&self.store, *id, &modal::item_form(&form.fields))
                }
                FormKind::BookingStatus(id) => self.state.set_booking_status(
                    &self.store,
                    *id,
                    modal::chosen_status(&form.fields),
                ),
                FormKind::Rating(title) => {
                    self.state
                        .set_rating(&self.store, title, modal::chosen_stars(&form.fields))
                }
            },
            Modal::Confirm(confirm) => match confirm.kind {
                ConfirmKind::DeleteUser(id) => self.state.delete_user(&self.store, id),
                ConfirmKind::DeleteItem(id) => self.state.delete_item(&self.store, id),
            },
            // The info card has nothing to submit; its keys all cancel.
            Modal::Info(_) => Ok(()),
        };
        match result {
            Ok(()) => {
                self.notice = None;
                if let Err(err) = self.refresh_views() {
                    self.notice = Some(Notice::danger(error_text(err)));
                }
            }
            Err(StoreError::Validation(msg)) => {
                self.notice = Some(Notice::danger(msg));
                self.modal = Some(active);
            }
            Err(err) => {
                self.notice = Some(Notice::danger(format!("Save error: {err}")));
            }
        }
    }

    // -- rendering

    pub fn render(&self, frame: &mut RenderFrame) {
        let (header, rest) = frame.area().split_top(2);
        let (body, footer) = rest.split_bottom(1);
        self.render_header(frame, header);
        match self.view {
            ViewId::Overview => overview::render_overview_frame(frame, body, &self.overview),
            ViewId::Users => users::render_users_frame(frame, body, &self.users),
            ViewId::Items => items::render_items_frame(frame, body, &self.items),
            ViewId::Bookings => bookings::render_bookings_frame(frame, body, &self.bookings),
            ViewId::Settings => {
                settings::render_settings_frame(frame, body, &self.settings, &self.state.settings);
            }
            ViewId::Logs => logs::render_logs_frame(frame, body, &self.logs),
            ViewId::History => history::render_history_frame(frame, body, &self.history),
        }
        self.render_footer(frame, footer);
        if let Some(active) = &self.modal {
            render_modal(frame, active);
        }
    }

    fn render_header(&self, frame: &mut RenderFrame, rect: Rect) {
        frame.draw_text(rect.x + 1, rect.y, "RentEase Admin", TextRole::Accent);
        if self.search_active || !self.search_query.is_empty() {
            let cursor = if self.search_active { "█" } else { "" };
            let role = if self.search_active {
                TextRole::Focus
            } else {
                TextRole::Muted
            };
            frame.draw_text(
                rect.x + 18,
                rect.y,
                &format!("search: {}{cursor}", self.search_query),
                role,
            );
        }
        let today = self.today.as_str();
        let today_x = rect.x + rect.width.saturating_sub(today.len() as u16 + 1);
        frame.draw_text(today_x, rect.y, today, TextRole::Muted);

        let mut x = rect.x + 1;
        for (i, view) in ViewId::ALL.iter().enumerate() {
            let label = format!("{}:{}", i + 1, view.label());
            let role = if *view == self.view {
                TextRole::Focus
            } else {
                TextRole::Muted
            };
            frame.draw_text(x, rect.y + 1, &label, role);
            x += label.chars().count() as u16 + 2;
        }
    }

    fn render_footer(&self, frame: &mut RenderFrame, rect: Rect) {
        if let Some(notice) = &self.notice {
            frame.draw_text_clipped(rect.x + 1, rect.y, rect.width, &notice.text, notice.role);
            return;
        }
        let hints = match self.view {
            ViewId::Overview => "1-7 views · / search · q quit",
            ViewId::Users => "a add · e edit · t toggle · x delete · f filter · q quit",
            ViewId::Items => "a add · e edit · t toggle · x delete · f filter · q quit",
            ViewId::Bookings => "s status · v view · c export csv · f filter · q quit",
            ViewId::Settings => "space toggle · q quit",
            ViewId::Logs => "j/k scroll · q quit",
            ViewId::History => "enter rate · q quit",
        };
        frame.draw_text_clipped(rect.x + 1, rect.y, rect.width, hints, TextRole::Muted);
    }
}

fn error_text(err: StoreError) -> String {
    match err {
        StoreError::Validation(msg) => msg,
        other => format!("Save error: {other}"),
    }
}
