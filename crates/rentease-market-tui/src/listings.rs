//! Catalog browsing: category/kind/price/query filters, price sort, and the
//! simulated-latency refresh pipeline.
//!
//! Every selector change starts a new refresh generation that completes a
//! few ticks later; only the newest generation is allowed to install rows,
//! so a superseded refresh never clobbers the display (last render wins).

use rentease_core::model::{Category, Listing};
use rentease_core::seed;
use rentease_core::state::MarketState;
use rentease_core::stats::format_peso;
use rentease_tui_adapter::input::{translate_nav, Key, KeyEvent, UiAction};
use rentease_tui_adapter::render::{Rect, RenderFrame};
use rentease_tui_adapter::style::TextRole;
use rentease_tui_adapter::widgets::{clip, BorderStyle};

use crate::app::Request;

/// Ticks between starting a refresh and its rows landing (~300ms at the
/// runtime's tick cadence).
pub const REFRESH_DELAY_TICKS: u8 = 3;

pub const DEFAULT_MAX_PRICE: i64 = 50_000;

const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::PriceAsc => "asc",
            SortOrder::PriceDesc => "desc",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SortOrder::Default => SortOrder::PriceAsc,
            SortOrder::PriceAsc => SortOrder::PriceDesc,
            SortOrder::PriceDesc => SortOrder::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRefresh {
    generation: u64,
    remaining_ticks: u8,
}

pub struct ListingsVm {
    category: Category,
    kind_idx: usize,
    max_price: i64,
    price_text: String,
    query: String,
    sort: SortOrder,
    editing_query: bool,
    editing_price: bool,
    selected: usize,
    rows: Vec<Listing>,
    heading: &'static str,
    loading: bool,
    generation: u64,
    pending: Vec<PendingRefresh>,
}

impl Default for ListingsVm {
    fn default() -> Self {
        Self {
            category: Category::Property,
            kind_idx: 0,
            max_price: DEFAULT_MAX_PRICE,
            price_text: String::new(),
            query: String::new(),
            sort: SortOrder::Default,
            editing_query: false,
            editing_price: false,
            selected: 0,
            rows: Vec::new(),
            heading: Category::Property.heading(),
            loading: true,
            generation: 0,
            pending: Vec::new(),
        }
    }
}

impl ListingsVm {
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.category.kind_options()[self.kind_idx % self.category.kind_options().len()]
    }

    #[must_use]
    pub fn max_price(&self) -> i64 {
        self.max_price
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub fn rows(&self) -> &[Listing] {
        &self.rows
    }

    /// Panel heading; updates only when a refresh completes, so it lags a
    /// category switch just like the rows do.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        self.heading
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.rows.get(self.selected)
    }

    #[must_use]
    pub fn editing_query(&self) -> bool {
        self.editing_query
    }

    #[must_use]
    pub fn editing_price(&self) -> bool {
        self.editing_price
    }

    /// Start a new refresh: bump the generation, enter the loading state,
    /// and schedule the rows to land after the artificial delay.
    pub fn begin_refresh(&mut self) {
        self.generation += 1;
        self.loading = true;
        self.pending.push(PendingRefresh {
            generation: self.generation,
            remaining_ticks: REFRESH_DELAY_TICKS,
        });
    }

    /// Advance all in-flight refreshes by one tick and complete the due ones.
    pub fn on_tick(&mut self) {
        for pending in &mut self.pending {
            pending.remaining_ticks = pending.remaining_ticks.saturating_sub(1);
        }
        let due: Vec<u64> = self
            .pending
            .iter()
            .filter(|p| p.remaining_ticks == 0)
            .map(|p| p.generation)
            .collect();
        self.pending.retain(|p| p.remaining_ticks > 0);
        for generation in due {
            self.complete_refresh(generation);
        }
    }

    /// Install rows for a finished refresh, unless a newer one has started
    /// since; stale completions are discarded outright.
    pub fn complete_refresh(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        let previous = self.rows.get(self.selected).map(|l| l.id);
        self.rows = self.compute_rows();
        self.heading = self.category.heading();
        self.loading = false;
        if let Some(id) = previous {
            if let Some(idx) = self.rows.iter().position(|l| l.id == id) {
                self.selected = idx;
                return;
            }
        }
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    fn compute_rows(&self) -> Vec<Listing> {
        let needle = self.query.to_lowercase();
        let kind = self.kind();
        let mut rows: Vec<Listing> = seed::catalog(self.category)
            .into_iter()
            .filter(|listing| matches_filter(listing, kind, self.max_price, &needle))
            .collect();
        match self.sort {
            SortOrder::Default => {}
            SortOrder::PriceAsc => rows.sort_by_key(|l| l.price),
            SortOrder::PriceDesc => rows.sort_by(|a, b| b.price.cmp(&a.price)),
        }
        rows
    }

    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
        self.kind_idx = 0;
        self.begin_refresh();
    }

    pub fn cycle_kind(&mut self) {
        self.kind_idx = (self.kind_idx + 1) % self.category.kind_options().len();
        self.begin_refresh();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.begin_refresh();
    }

    /// Restore query, price cap, sort and kind to their defaults. The
    /// category stays put.
    pub fn reset(&mut self) {
        self.query.clear();
        self.price_text.clear();
        self.max_price = DEFAULT_MAX_PRICE;
        self.sort = SortOrder::Default;
        self.kind_idx = 0;
        self.begin_refresh();
    }

    fn apply_price_text(&mut self) {
        self.max_price = if self.price_text.is_empty() {
            DEFAULT_MAX_PRICE
        } else {
            self.price_text.parse().unwrap_or(DEFAULT_MAX_PRICE)
        };
        self.begin_refresh();
    }
}

fn matches_filter(listing: &Listing, kind: &str, max_price: i64, needle: &str) -> bool {
    let kind_ok = kind == "any" || listing.kind == kind;
    let price_ok = listing.price <= max_price;
    let query_ok = needle.is_empty()
        || format!(
            "{} {} {}",
            listing.title, listing.location, listing.description
        )
        .to_lowercase()
        .contains(needle);
    kind_ok && price_ok && query_ok
}

pub fn apply_listings_input(vm: &mut ListingsVm, event: KeyEvent) -> Option<Request> {
    if vm.editing_query {
        match event.key {
            Key::Esc => {
                vm.editing_query = false;
                if !vm.query.is_empty() {
                    vm.query.clear();
                    vm.begin_refresh();
                }
            }
            Key::Enter => vm.editing_query = false,
            Key::Backspace => {
                if vm.query.pop().is_some() {
                    vm.begin_refresh();
                }
            }
            Key::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                vm.query.push(ch);
                vm.begin_refresh();
            }
            _ => {}
        }
        return None;
    }

    if vm.editing_price {
        match event.key {
            Key::Esc | Key::Enter => vm.editing_price = false,
            Key::Backspace => {
                if vm.price_text.pop().is_some() {
                    vm.apply_price_text();
                }
            }
            Key::Char(ch) if ch.is_ascii_digit() && vm.price_text.len() < 9 => {
                vm.price_text.push(ch);
                vm.apply_price_text();
            }
            _ => {}
        }
        return None;
    }

    if let Some(action) = translate_nav(event) {
        let last = vm.rows.len().saturating_sub(1);
        match action {
            UiAction::MoveUp => vm.selected = vm.selected.saturating_sub(1),
            UiAction::MoveDown => vm.selected = (vm.selected + 1).min(last),
            UiAction::PageUp => vm.selected = vm.selected.saturating_sub(PAGE_STEP),
            UiAction::PageDown => vm.selected = (vm.selected + PAGE_STEP).min(last),
            UiAction::Home => vm.selected = 0,
            UiAction::End => vm.selected = last,
            UiAction::Activate => {
                return vm.selected_listing().map(|l| Request::OpenDetail(l.id));
            }
            _ => {}
        }
        return None;
    }

    match event.key {
        Key::Char('b') => vm.selected_listing().map(|l| Request::OpenBooking(l.id)),
        Key::Char('f') => vm.selected_listing().map(|l| Request::ToggleFavorite(l.id)),
        Key::Char('c') => {
            vm.cycle_category();
            None
        }
        Key::Char('t') => {
            vm.cycle_kind();
            None
        }
        Key::Char('s') => {
            vm.cycle_sort();
            None
        }
        Key::Char('m') => {
            vm.editing_price = true;
            vm.price_text = vm.max_price.to_string();
            None
        }
        Key::Char('/') => {
            vm.editing_query = true;
            None
        }
        Key::Char('r') => {
            vm.reset();
            None
        }
        _ => None,
    }
}

pub fn render_listings_frame(
    frame: &mut RenderFrame,
    rect: Rect,
    vm: &ListingsVm,
    state: &MarketState,
) {
    let title = format!("{} ({})", vm.heading(), vm.rows.len());
    let inner = frame.draw_panel(rect, Some(&title), BorderStyle::Plain);
    if inner.is_empty() {
        return;
    }

    render_filter_strip(frame, inner, vm);
    let list = Rect::new(
        inner.x,
        inner.y + 2,
        inner.width,
        inner.height.saturating_sub(2),
    );
    if list.height == 0 {
        return;
    }

    if vm.loading {
        frame.draw_text(list.x, list.y, "Loading listings…", TextRole::Muted);
        return;
    }
    if vm.rows.is_empty() {
        frame.draw_text(list.x, list.y, "No results found", TextRole::Muted);
        return;
    }

    let visible = usize::from(list.height);
    let origin = scroll_origin(vm.selected, vm.rows.len(), visible);
    let wide = list.width >= 64;
    for (offset, listing) in vm.rows.iter().skip(origin).take(visible).enumerate() {
        let y = list.y + offset as u16;
        let favorite = state.is_favorite(listing.id);
        let marker = if favorite { "♥" } else { " " };
        let line = if wide {
            format!(
                "{marker} {:<24} {:<14} {:<11} {:>10}",
                clip(&listing.title, 24),
                clip(&listing.location, 14),
                clip(&listing.kind, 11),
                format_peso(listing.price),
            )
        } else {
            format!(
                "{marker} {} · {}",
                clip(&listing.title, usize::from(list.width).saturating_sub(14)),
                format_peso(listing.price),
            )
        };
        frame.draw_text_clipped(list.x, y, list.width, &line, TextRole::Default);
        if favorite {
            let style = frame.theme().text_style(TextRole::Danger);
            frame.put(list.x, y, '♥', style);
        }
        if origin + offset == vm.selected {
            frame.highlight_span(list.x, y, list.width);
        }
    }
}

fn render_filter_strip(frame: &mut RenderFrame, inner: Rect, vm: &ListingsVm) {
    let line = format!(
        "category: {}   kind: {}   sort: {}",
        vm.category.as_str(),
        vm.kind(),
        vm.sort.label(),
    );
    frame.draw_text_clipped(inner.x, inner.y, inner.width, &line, TextRole::Muted);

    let price = if vm.editing_price {
        format!("max ₱{}█", vm.price_text)
    } else {
        format!("max {}", format_peso(vm.max_price))
    };
    let query = if vm.editing_query {
        format!("query: {}█", vm.query)
    } else if vm.query.is_empty() {
        String::new()
    } else {
        format!("query: {}", vm.query)
    };
    let role = if vm.editing_price || vm.editing_query {
        TextRole::Focus
    } else {
        TextRole::Muted
    };
    let second = if query.is_empty() {
        price
    } else {
        format!("{price}   {query}")
    };
    frame.draw_text_clipped(inner.x, inner.y + 1, inner.width, &second, role);
}

fn scroll_origin(selected: usize, total: usize, visible: usize) -> usize {
    if total <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(total - visible)
}
