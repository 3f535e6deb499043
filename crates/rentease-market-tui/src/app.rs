//! Storefront shell: tab routing, modal dispatch, and the frame layout
//! around the listings and rentals views.

use rentease_core::state::MarketState;
use rentease_core::store::{Store, StoreError};
use rentease_core::today_str;
use rentease_tui_adapter::input::{translate_nav, InputEvent, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;

use crate::listings::{self, ListingsVm};
use crate::modal::{self, apply_modal_input, render_modal, FormKind, Modal, ModalOutcome};
use crate::rentals::{self, RentalsVm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Listings,
    Rentals,
}

impl ViewId {
    pub const ALL: [ViewId; 2] = [ViewId::Listings, ViewId::Rentals];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewId::Listings => "Browse",
            ViewId::Rentals => "My Rentals",
        }
    }

    #[must_use]
    pub fn for_hotkey(ch: char) -> Option<Self> {
        let idx = usize::try_from(u32::from(ch).checked_sub(u32::from('1'))?).ok()?;
        Self::ALL.get(idx).copied()
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            ViewId::Listings => ViewId::Rentals,
            ViewId::Rentals => ViewId::Listings,
        }
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
    ToggleFavorite(u32),
    OpenDetail(u32),
    OpenBooking(u32),
    OpenReview(String),
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
    state: MarketState,
    view: ViewId,
    today: String,
    notice: Option<Notice>,
    modal: Option<Modal>,
    listings: ListingsVm,
    rentals: RentalsVm,
}

impl App {
    pub fn new(store: Store) -> Result<Self, StoreError> {
        let state = MarketState::hydrate(&store)?;
        let mut app = Self {
            store,
            state,
            view: ViewId::Listings,
            today: today_str(),
            notice: None,
            modal: None,
            listings: ListingsVm::default(),
            rentals: RentalsVm::default(),
        };
        // The catalog loads through the same delayed pipeline as every later
        // filter change, so startup shows the loading state briefly.
        app.listings.begin_refresh();
        app.rentals.set_rows(&app.state, &app.today);
        Ok(app)
    }

    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    #[must_use]
    pub fn state(&self) -> &MarketState {
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
    pub fn listings_vm(&self) -> &ListingsVm {
        &self.listings
    }

    #[must_use]
    pub fn rentals_vm(&self) -> &RentalsVm {
        &self.rentals
    }

    #[must_use]
    pub fn today(&self) -> &str {
        &self.today
    }

    /// Pin the date used for the active/history split. The tick handler
    /// calls this with the real clock.
    pub fn set_today(&mut self, today: &str) {
        if self.today != today {
            self.today = today.to_string();
            self.rentals.set_rows(&self.state, &self.today);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::Tick => {
                self.set_today(&today_str());
                self.listings.on_tick();
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
                ModalOutcome::Book(title) => {
                    self.modal = Some(modal::booking_modal(&title));
                }
            }
            return Command::None;
        }

        // The listings view owns the keyboard while a query or price cap is
        // being typed.
        let capturing = self.view == ViewId::Listings
            && (self.listings.editing_query() || self.listings.editing_price());
        if !capturing {
            if key.is_char('q') || (key.modifiers.ctrl && key.key == Key::Char('c')) {
                return Command::Quit;
            }
            if let Key::Char(ch) = key.key {
                if let Some(view) = ViewId::for_hotkey(ch) {
                    self.view = view;
                    return Command::None;
                }
            }
            // Horizontal navigation hops between the two tabs; neither view
            // uses it for rows.
            if matches!(
                translate_nav(key),
                Some(UiAction::MoveLeft | UiAction::MoveRight)
            ) {
                self.view = self.view.other();
                return Command::None;
            }
        }

        let request = match self.view {
            ViewId::Listings => listings::apply_listings_input(&mut self.listings, key),
            ViewId::Rentals => rentals::apply_rentals_input(&mut self.rentals, key),
        };
        if let Some(request) = request {
            self.perform(request);
        }
        Command::None
    }

    fn perform(&mut self, request: Request) {
        let result = match request {
            Request::ToggleFavorite(id) => self
                .state
                .toggle_favorite(&self.store, id)
                .map(|_| self.listings.begin_refresh()),
            Request::OpenDetail(id) => {
                if let Some(listing) = self.listings.rows().iter().find(|l| l.id == id) {
                    self.modal = Some(modal::detail_modal(listing));
                }
                Ok(())
            }
            Request::OpenBooking(id) => {
                if let Some(listing) = self.listings.rows().iter().find(|l| l.id == id) {
                    self.modal = Some(modal::booking_modal(&listing.title));
                }
                Ok(())
            }
            Request::OpenReview(title) => {
                let existing = self.state.review_for(&title).map(str::to_string);
                self.modal = Some(modal::review_modal(&title, existing.as_deref()));
                Ok(())
            }
        };
        if let Err(err) = result {
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
                FormKind::Booking(title) => {
                    let (start, end, quantity) = modal::rental_request(&form.fields);
                    self.state
                        .confirm_rental(&self.store, title, &start, &end, &quantity)
                        .map(|()| Some(Notice::success("Booking confirmed!".to_string())))
                }
                FormKind::Review(title) => self
                    .state
                    .submit_review(&self.store, title, &modal::review_text(&form.fields))
                    .map(|()| None),
            },
            Modal::Detail(_) => Ok(None),
        };
        match result {
            Ok(notice) => {
                self.notice = notice;
                self.rentals.set_rows(&self.state, &self.today);
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
            ViewId::Listings => {
                listings::render_listings_frame(frame, body, &self.listings, &self.state);
            }
            ViewId::Rentals => rentals::render_rentals_frame(frame, body, &self.rentals),
        }
        self.render_footer(frame, footer);
        if let Some(active) = &self.modal {
            render_modal(frame, active);
        }
    }

    fn render_header(&self, frame: &mut RenderFrame, rect: Rect) {
        frame.draw_text(rect.x + 1, rect.y, "RentEase", TextRole::Accent);
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
            ViewId::Listings => {
                "b book · f fav · c category · t kind · s sort · m price · / query · r reset"
            }
            ViewId::Rentals => "enter review · 1-2 views · q quit",
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
