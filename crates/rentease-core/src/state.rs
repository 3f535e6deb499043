//! Hydrated application state and the mutators that change it.
//!
//! Mutators follow one contract: apply exactly one change, flush to the
//! store before anyone re-renders, and (admin side) append a log line
//! describing the change. Ids are assigned `max(existing) + 1` and never
//! reused after deletes.

use std::collections::BTreeMap;

use crate::model::{
    Booking, BookingStatus, Item, LogEntry, Rental, Role, SettingKey, Settings, User,
};
use crate::seed;
use crate::store::{Store, StoreError};
use crate::now_rfc3339;

pub const USERS_KEY: &str = "admin_users";
pub const ITEMS_KEY: &str = "admin_items";
pub const BOOKINGS_KEY: &str = "admin_bookings";
pub const RATINGS_KEY: &str = "admin_reviews";
pub const LOGS_KEY: &str = "admin_logs";
pub const FAVORITES_KEY: &str = "favorites";
pub const RENTALS_KEY: &str = "bookings";
pub const REVIEWS_KEY: &str = "reviews";

/// Only the newest entries up to this cap survive a log append.
pub const LOG_CAP: usize = 200;

// ---------------------------------------------------------------------------
// Activity log (read-through: always loaded fresh from the store)
// ---------------------------------------------------------------------------

pub fn load_logs(store: &Store) -> Result<Vec<LogEntry>, StoreError> {
    Ok(store.read_json(LOGS_KEY)?.unwrap_or_default())
}

/// Append one log line, evicting the oldest entries beyond [`LOG_CAP`].
pub fn add_log(store: &Store, text: &str) -> Result<(), StoreError> {
    let mut logs = load_logs(store)?;
    logs.push(LogEntry {
        t: now_rfc3339(),
        text: text.to_string(),
    });
    if logs.len() > LOG_CAP {
        let overflow = logs.len() - LOG_CAP;
        logs.drain(..overflow);
    }
    store.write_json(LOGS_KEY, &logs)
}

// ---------------------------------------------------------------------------
// Form payloads
// ---------------------------------------------------------------------------

/// Add/Edit payload for users. Blank text fields keep the previous value on
/// edit; on add, name and email are required.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

/// Add/Edit payload for items. `price` stays raw here: the mutators parse it
/// permissively (previous value on edit, zero on add) instead of rejecting.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub title: String,
    pub category: String,
    pub price: String,
    pub location: String,
    pub active: bool,
}

fn parse_price(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn keep_previous(input: &str, previous: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        previous.to_string()
    } else {
        trimmed.to_string()
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

// ---------------------------------------------------------------------------
// Admin state
// ---------------------------------------------------------------------------

/// All admin collections, hydrated once at startup and owned explicitly by
/// the app (no ambient globals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    pub users: Vec<User>,
    pub items: Vec<Item>,
    pub bookings: Vec<Booking>,
    /// Star ratings by item title, 1-5.
    pub ratings: BTreeMap<String, u8>,
    pub settings: Settings,
}

impl AdminState {
    /// Load every collection, seeding any that is absent or unparseable.
    pub fn hydrate(store: &Store) -> Result<Self, StoreError> {
        let users = store.read_json(USERS_KEY)?.unwrap_or_else(seed::users);
        let items = store.read_json(ITEMS_KEY)?.unwrap_or_else(seed::items);
        let bookings = store
            .read_json(BOOKINGS_KEY)?
            .unwrap_or_else(seed::bookings);
        let ratings = store.read_json(RATINGS_KEY)?.unwrap_or_default();

        let mut settings = Settings::default();
        for key in SettingKey::ALL {
            if let Some(value) = store.read_json::<bool>(key.storage_key())? {
                settings.set(key, value);
            }
        }

        Ok(Self {
            users,
            items,
            bookings,
            ratings,
            settings,
        })
    }

    /// Flush every admin collection. Called by each mutator right after the
    /// in-memory change so storage never lags behind what is displayed.
    pub fn persist(&self, store: &Store) -> Result<(), StoreError> {
        store.write_json(USERS_KEY, &self.users)?;
        store.write_json(ITEMS_KEY, &self.items)?;
        store.write_json(BOOKINGS_KEY, &self.bookings)?;
        store.write_json(RATINGS_KEY, &self.ratings)
    }

    /// Title join used by stats and the history view. Exact match; duplicate
    /// titles collide on the first hit, a known gap kept as-is.
    #[must_use]
    pub fn find_item_by_title(&self, title: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.title == title)
    }

    // -- users

    pub fn add_user(&mut self, store: &Store, form: &UserForm) -> Result<u32, StoreError> {
        let name = form.name.trim();
        let email = form.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(StoreError::Validation(
                "Name and email required".to_string(),
            ));
        }
        let id = next_id(self.users.iter().map(|u| u.id));
        self.users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: form.role,
            active: true,
        });
        self.persist(store)?;
        add_log(store, &format!("Added user {email}"))?;
        Ok(id)
    }

    pub fn edit_user(&mut self, store: &Store, id: u32, form: &UserForm) -> Result<(), StoreError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::UserNotFound(id))?;
        let email = {
            let user = &mut self.users[idx];
            user.name = keep_previous(&form.name, &user.name);
            user.email = keep_previous(&form.email, &user.email);
            user.role = form.role;
            user.active = form.active;
            user.email.clone()
        };
        self.persist(store)?;
        add_log(store, &format!("User edited: {email}"))
    }

    pub fn toggle_user(&mut self, store: &Store, id: u32) -> Result<bool, StoreError> {
        let (active, email) = {
            let user = self
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(StoreError::UserNotFound(id))?;
            user.active = !user.active;
            (user.active, user.email.clone())
        };
        self.persist(store)?;
        let word = if active { "Enabled" } else { "Disabled" };
        add_log(store, &format!("{word} user: {email}"))?;
        Ok(active)
    }

    /// Remove exactly one user. The log line is written first, as the change
    /// description needs the record that is about to go away.
    pub fn delete_user(&mut self, store: &Store, id: u32) -> Result<(), StoreError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::UserNotFound(id))?;
        add_log(store, &format!("Deleted user {}", self.users[idx].email))?;
        self.users.remove(idx);
        self.persist(store)
    }

    // -- items

    pub fn add_item(&mut self, store: &Store, form: &ItemForm) -> Result<u32, StoreError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(StoreError::Validation("Title required".to_string()));
        }
        let id = next_id(self.items.iter().map(|i| i.id));
        self.items.push(Item {
            id,
            title: title.to_string(),
            category: form.category.trim().to_string(),
            price: parse_price(&form.price).unwrap_or(0),
            location: form.location.trim().to_string(),
            active: true,
        });
        self.persist(store)?;
        add_log(store, &format!("Added item {title}"))?;
        Ok(id)
    }

    pub fn edit_item(&mut self, store: &Store, id: u32, form: &ItemForm) -> Result<(), StoreError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;
        let title = {
            let item = &mut self.items[idx];
            item.title = keep_previous(&form.title, &item.title);
            item.category = keep_previous(&form.category, &item.category);
            item.price = parse_price(&form.price).unwrap_or(item.price);
            item.location = keep_previous(&form.location, &item.location);
            item.active = form.active;
            item.title.clone()
        };
        self.persist(store)?;
        add_log(store, &format!("Item edited: {title}"))
    }

    pub fn toggle_item(&mut self, store: &Store, id: u32) -> Result<bool, StoreError> {
        let (active, title) = {
            let item = self
                .items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or(StoreError::ItemNotFound(id))?;
            item.active = !item.active;
            (item.active, item.title.clone())
        };
        self.persist(store)?;
        let word = if active { "Enabled" } else { "Disabled" };
        add_log(store, &format!("{word} item: {title}"))?;
        Ok(active)
    }

    pub fn delete_item(&mut self, store: &Store, id: u32) -> Result<(), StoreError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;
        add_log(store, &format!("Deleted item {}", self.items[idx].title))?;
        self.items.remove(idx);
        self.persist(store)
    }

    // -- bookings

    /// Unguarded overwrite: any booking may move to any status, last write
    /// wins, no history beyond the log line.
    pub fn set_booking_status(
        &mut self,
        store: &Store,
        id: u32,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::BookingNotFound(id))?;
        booking.status = status;
        self.persist(store)?;
        add_log(store, &format!("Booking {id} set to {}", status.as_str()))
    }

    // -- ratings and settings

    pub fn set_rating(&mut self, store: &Store, title: &str, stars: u8) -> Result<(), StoreError> {
        if !(1..=5).contains(&stars) {
            return Err(StoreError::Validation(format!(
                "rating must be 1-5, got {stars}"
            )));
        }
        self.ratings.insert(title.to_string(), stars);
        self.persist(store)?;
        add_log(store, &format!("Rating set for {title}: {stars} stars"))
    }

    pub fn set_setting(
        &mut self,
        store: &Store,
        key: SettingKey,
        value: bool,
    ) -> Result<(), StoreError> {
        self.settings.set(key, value);
        store.write_json(key.storage_key(), &value)?;
        add_log(
            store,
            &format!("Setting {} set to {value}", key.storage_key()),
        )
    }
}

// ---------------------------------------------------------------------------
// Marketplace state
// ---------------------------------------------------------------------------

/// Marketplace collections. The catalog itself is static ([`seed::catalog`]);
/// only favorites, rentals and reviews persist. No activity log here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketState {
    pub favorites: Vec<u32>,
    pub rentals: Vec<Rental>,
    pub reviews: BTreeMap<String, String>,
}

impl MarketState {
    pub fn hydrate(store: &Store) -> Result<Self, StoreError> {
        Ok(Self {
            favorites: store.read_json(FAVORITES_KEY)?.unwrap_or_default(),
            rentals: store.read_json(RENTALS_KEY)?.unwrap_or_default(),
            reviews: store.read_json(REVIEWS_KEY)?.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    #[must_use]
    pub fn review_for(&self, title: &str) -> Option<&str> {
        self.reviews.get(title).map(String::as_str)
    }

    /// Returns whether the listing is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, store: &Store, id: u32) -> Result<bool, StoreError> {
        let now_favorite = if self.is_favorite(id) {
            self.favorites.retain(|existing| *existing != id);
            false
        } else {
            self.favorites.push(id);
            true
        };
        store.write_json(FAVORITES_KEY, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn confirm_rental(
        &mut self,
        store: &Store,
        title: &str,
        start: &str,
        end: &str,
        quantity_raw: &str,
    ) -> Result<(), StoreError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(StoreError::Validation(
                "Select start and end dates".to_string(),
            ));
        }
        self.rentals.push(Rental {
            title: title.to_string(),
            start: start.trim().to_string(),
            end: end.trim().to_string(),
            quantity: quantity_raw.trim().parse().unwrap_or(1),
        });
        store.write_json(RENTALS_KEY, &self.rentals)
    }

    /// Store free text under the rental's title, overwriting any prior review.
    pub fn submit_review(
        &mut self,
        store: &Store,
        title: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        self.reviews.insert(title.to_string(), text.to_string());
        store.write_json(REVIEWS_KEY, &self.reviews)
    }
}
