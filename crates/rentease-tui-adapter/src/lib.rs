//! Terminal UI kit shared by the admin console and the marketplace browser.
//!
//! Everything here is backend-agnostic: a frame is a grid of styled cells
//! that views paint into and tests snapshot as plain text. The interactive
//! runtimes translate cells to real terminal escapes; nothing in this crate
//! talks to a terminal directly.

/// Stable crate label used by bootstrap smoke tests.
#[must_use]
pub fn crate_label() -> &'static str {
    "rentease-tui-adapter"
}

pub mod style {
    //! Theme palettes and the role-to-style mapping.

    /// Which palette the apps render with. Selected once at startup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ThemeKind {
        Dark,
        Light,
    }

    impl ThemeKind {
        pub const ALL: [ThemeKind; 2] = [ThemeKind::Dark, ThemeKind::Light];

        #[must_use]
        pub fn as_str(self) -> &'static str {
            match self {
                ThemeKind::Dark => "dark",
                ThemeKind::Light => "light",
            }
        }

        /// Lenient label parse for environment configuration. Anything that
        /// is not recognisably "light" renders dark.
        #[must_use]
        pub fn from_label(label: &str) -> Self {
            match label.trim().to_ascii_lowercase().as_str() {
                "light" => ThemeKind::Light,
                _ => ThemeKind::Dark,
            }
        }
    }

    /// Palette slots as xterm-256 color indices.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StyleTokens {
        pub bg: u8,
        pub surface: u8,
        pub fg: u8,
        pub muted: u8,
        pub accent: u8,
        pub success: u8,
        pub danger: u8,
        pub warning: u8,
        pub focus: u8,
    }

    /// Semantic text roles. Views pick roles; the theme decides colors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextRole {
        Default,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Focus,
    }

    /// Flat per-cell attributes. The runtimes map these onto whatever
    /// backend actually paints the screen.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellStyle {
        pub fg: u8,
        pub bg: u8,
        pub bold: bool,
        pub dim: bool,
        pub underline: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Theme {
        pub kind: ThemeKind,
        pub tokens: StyleTokens,
    }

    impl Theme {
        #[must_use]
        pub fn for_kind(kind: ThemeKind) -> Self {
            let tokens = match kind {
                ThemeKind::Dark => StyleTokens {
                    bg: 233,
                    surface: 236,
                    fg: 253,
                    muted: 245,
                    accent: 37,
                    success: 78,
                    danger: 203,
                    warning: 214,
                    focus: 87,
                },
                ThemeKind::Light => StyleTokens {
                    bg: 231,
                    surface: 254,
                    fg: 235,
                    muted: 243,
                    accent: 30,
                    success: 28,
                    danger: 160,
                    warning: 130,
                    focus: 26,
                },
            };
            Self { kind, tokens }
        }

        #[must_use]
        pub fn text_style(&self, role: TextRole) -> CellStyle {
            let t = self.tokens;
            let (fg, bold) = match role {
                TextRole::Default => (t.fg, false),
                TextRole::Muted => (t.muted, false),
                TextRole::Accent => (t.accent, true),
                TextRole::Success => (t.success, false),
                TextRole::Danger => (t.danger, true),
                TextRole::Warning => (t.warning, false),
                TextRole::Focus => (t.focus, true),
            };
            CellStyle {
                fg,
                bg: t.bg,
                bold,
                dim: false,
                underline: false,
            }
        }
    }
}

pub mod render {
    //! Cell-grid frames, rectangles, and the drawing primitives views use.

    use crate::style::{CellStyle, TextRole, Theme};
    use crate::widgets::{clip, BorderStyle};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cell {
        pub ch: char,
        pub style: CellStyle,
    }

    /// Half-open pixel-free rectangle in cell coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rect {
        pub x: u16,
        pub y: u16,
        pub width: u16,
        pub height: u16,
    }

    impl Rect {
        #[must_use]
        pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        /// Shrink by a margin on each side, saturating to empty.
        #[must_use]
        pub fn inner(self, margin_x: u16, margin_y: u16) -> Self {
            Self {
                x: self.x + margin_x.min(self.width / 2),
                y: self.y + margin_y.min(self.height / 2),
                width: self.width.saturating_sub(margin_x * 2),
                height: self.height.saturating_sub(margin_y * 2),
            }
        }

        /// Carve `rows` off the top; returns (top, remainder).
        #[must_use]
        pub fn split_top(self, rows: u16) -> (Self, Self) {
            let rows = rows.min(self.height);
            (
                Self::new(self.x, self.y, self.width, rows),
                Self::new(self.x, self.y + rows, self.width, self.height - rows),
            )
        }

        /// Carve `rows` off the bottom; returns (remainder, bottom).
        #[must_use]
        pub fn split_bottom(self, rows: u16) -> (Self, Self) {
            let rows = rows.min(self.height);
            (
                Self::new(self.x, self.y, self.width, self.height - rows),
                Self::new(
                    self.x,
                    self.y + self.height - rows,
                    self.width,
                    rows,
                ),
            )
        }

        /// Carve `cols` off the left; returns (left, right).
        #[must_use]
        pub fn split_left(self, cols: u16) -> (Self, Self) {
            let cols = cols.min(self.width);
            (
                Self::new(self.x, self.y, cols, self.height),
                Self::new(self.x + cols, self.y, self.width - cols, self.height),
            )
        }

        #[must_use]
        pub fn is_empty(self) -> bool {
            self.width == 0 || self.height == 0
        }
    }

    /// One rendered screen. Row-major cell storage; (0, 0) is top-left.
    pub struct RenderFrame {
        width: u16,
        height: u16,
        theme: Theme,
        cells: Vec<Cell>,
    }

    impl RenderFrame {
        #[must_use]
        pub fn new(width: u16, height: u16, theme: Theme) -> Self {
            let blank = Cell {
                ch: ' ',
                style: theme.text_style(TextRole::Default),
            };
            Self {
                width,
                height,
                theme,
                cells: vec![blank; usize::from(width) * usize::from(height)],
            }
        }

        #[must_use]
        pub fn width(&self) -> u16 {
            self.width
        }

        #[must_use]
        pub fn height(&self) -> u16 {
            self.height
        }

        #[must_use]
        pub fn theme(&self) -> Theme {
            self.theme
        }

        #[must_use]
        pub fn area(&self) -> Rect {
            Rect::new(0, 0, self.width, self.height)
        }

        fn index(&self, x: u16, y: u16) -> Option<usize> {
            if x < self.width && y < self.height {
                Some(usize::from(y) * usize::from(self.width) + usize::from(x))
            } else {
                None
            }
        }

        #[must_use]
        pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
            self.index(x, y).map(|i| self.cells[i])
        }

        pub fn put(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
            if let Some(i) = self.index(x, y) {
                self.cells[i] = Cell { ch, style };
            }
        }

        pub fn draw_text(&mut self, x: u16, y: u16, text: &str, role: TextRole) {
            let style = self.theme.text_style(role);
            self.draw_text_styled(x, y, text, style);
        }

        pub fn draw_text_styled(&mut self, x: u16, y: u16, text: &str, style: CellStyle) {
            let mut col = x;
            for ch in text.chars() {
                if col >= self.width {
                    break;
                }
                self.put(col, y, ch, style);
                col += 1;
            }
        }

        /// Draw at most `max_width` columns, marking truncation with `~`.
        pub fn draw_text_clipped(
            &mut self,
            x: u16,
            y: u16,
            max_width: u16,
            text: &str,
            role: TextRole,
        ) {
            if max_width == 0 {
                return;
            }
            let clipped = clip(text, usize::from(max_width));
            self.draw_text(x, y, &clipped, role);
        }

        /// Repaint a span with the surface background, used for selection
        /// bars. Glyphs already in the span are kept.
        pub fn highlight_span(&mut self, x: u16, y: u16, width: u16) {
            let surface = self.theme.tokens.surface;
            for col in x..x.saturating_add(width) {
                if let Some(i) = self.index(col, y) {
                    self.cells[i].style.bg = surface;
                    self.cells[i].style.bold = true;
                }
            }
        }

        pub fn fill_rect(&mut self, rect: Rect, ch: char, style: CellStyle) {
            for y in rect.y..rect.y.saturating_add(rect.height) {
                for x in rect.x..rect.x.saturating_add(rect.width) {
                    self.put(x, y, ch, style);
                }
            }
        }

        /// Draw a bordered panel, clear its interior, and return the inner
        /// rectangle for content. Rects thinner than the border collapse to
        /// an empty inner rect.
        pub fn draw_panel(
            &mut self,
            rect: Rect,
            title: Option<&str>,
            borders: BorderStyle,
        ) -> Rect {
            if rect.width < 2 || rect.height < 2 {
                return Rect::new(rect.x, rect.y, 0, 0);
            }
            let style = self.theme.text_style(TextRole::Muted);
            let chars = borders.chars();
            let right = rect.x + rect.width - 1;
            let bottom = rect.y + rect.height - 1;

            self.fill_rect(
                rect.inner(1, 1),
                ' ',
                self.theme.text_style(TextRole::Default),
            );
            for x in rect.x + 1..right {
                self.put(x, rect.y, chars.horizontal, style);
                self.put(x, bottom, chars.horizontal, style);
            }
            for y in rect.y + 1..bottom {
                self.put(rect.x, y, chars.vertical, style);
                self.put(right, y, chars.vertical, style);
            }
            self.put(rect.x, rect.y, chars.top_left, style);
            self.put(right, rect.y, chars.top_right, style);
            self.put(rect.x, bottom, chars.bottom_left, style);
            self.put(right, bottom, chars.bottom_right, style);

            if let Some(title) = title {
                let title_max = usize::from(rect.width.saturating_sub(4));
                if title_max > 0 {
                    let label = format!(" {} ", clip(title, title_max));
                    self.draw_text(rect.x + 1, rect.y, &label, TextRole::Accent);
                }
            }
            rect.inner(1, 1)
        }

        /// One row as plain text with trailing blanks trimmed. The unit most
        /// view tests assert against.
        #[must_use]
        pub fn row_text(&self, y: u16) -> String {
            let mut row = String::with_capacity(usize::from(self.width));
            for x in 0..self.width {
                if let Some(cell) = self.cell(x, y) {
                    row.push(cell.ch);
                }
            }
            row.trim_end().to_string()
        }

        /// The whole frame as newline-joined rows.
        #[must_use]
        pub fn snapshot(&self) -> String {
            (0..self.height)
                .map(|y| self.row_text(y))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub mod widgets {
    //! Small building blocks: borders, clipping, centering, form fields.

    use crate::input::Key;
    use crate::render::{Rect, RenderFrame};
    use crate::style::TextRole;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BorderStyle {
        Plain,
        Rounded,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BorderChars {
        pub top_left: char,
        pub top_right: char,
        pub bottom_left: char,
        pub bottom_right: char,
        pub horizontal: char,
        pub vertical: char,
    }

    impl BorderStyle {
        #[must_use]
        pub fn chars(self) -> BorderChars {
            match self {
                BorderStyle::Plain => BorderChars {
                    top_left: '┌',
                    top_right: '┐',
                    bottom_left: '└',
                    bottom_right: '┘',
                    horizontal: '─',
                    vertical: '│',
                },
                BorderStyle::Rounded => BorderChars {
                    top_left: '╭',
                    top_right: '╮',
                    bottom_left: '╰',
                    bottom_right: '╯',
                    horizontal: '─',
                    vertical: '│',
                },
            }
        }
    }

    /// Truncate to `max_width` characters, spending the last column on `~`
    /// when anything was cut.
    #[must_use]
    pub fn clip(text: &str, max_width: usize) -> String {
        let count = text.chars().count();
        if count <= max_width {
            return text.to_string();
        }
        if max_width == 0 {
            return String::new();
        }
        let mut out: String = text.chars().take(max_width - 1).collect();
        out.push('~');
        out
    }

    /// A `width` x `height` rect centered inside `area`, clamped to fit.
    #[must_use]
    pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    /// What a form field holds. Text fields edit freely; flags toggle;
    /// choices cycle through a fixed option list.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FieldValue {
        Text(String),
        Flag(bool),
        Choice {
            options: Vec<String>,
            selected: usize,
        },
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FormField {
        pub label: String,
        pub value: FieldValue,
    }

    impl FormField {
        #[must_use]
        pub fn text(label: &str, initial: &str) -> Self {
            Self {
                label: label.to_string(),
                value: FieldValue::Text(initial.to_string()),
            }
        }

        #[must_use]
        pub fn flag(label: &str, on: bool) -> Self {
            Self {
                label: label.to_string(),
                value: FieldValue::Flag(on),
            }
        }

        #[must_use]
        pub fn choice(label: &str, options: &[&str], selected: usize) -> Self {
            let options: Vec<String> = options.iter().map(|o| (*o).to_string()).collect();
            let selected = if options.is_empty() {
                0
            } else {
                selected.min(options.len() - 1)
            };
            Self {
                label: label.to_string(),
                value: FieldValue::Choice { options, selected },
            }
        }

        #[must_use]
        pub fn text_value(&self) -> &str {
            match &self.value {
                FieldValue::Text(text) => text,
                _ => "",
            }
        }

        #[must_use]
        pub fn flag_value(&self) -> bool {
            matches!(self.value, FieldValue::Flag(true))
        }

        #[must_use]
        pub fn selected_option(&self) -> Option<&str> {
            match &self.value {
                FieldValue::Choice { options, selected } => {
                    options.get(*selected).map(String::as_str)
                }
                _ => None,
            }
        }

        #[must_use]
        pub fn display_value(&self) -> String {
            match &self.value {
                FieldValue::Text(text) => text.clone(),
                FieldValue::Flag(on) => if *on { "[x]" } else { "[ ]" }.to_string(),
                FieldValue::Choice { options, selected } => options
                    .get(*selected)
                    .map_or_else(String::new, |opt| format!("‹ {opt} ›")),
            }
        }

        /// Apply one key to the field. Returns true when the field changed
        /// or consumed the key.
        pub fn apply_key(&mut self, key: Key) -> bool {
            match &mut self.value {
                FieldValue::Text(text) => match key {
                    Key::Char(ch) => {
                        text.push(ch);
                        true
                    }
                    Key::Backspace => {
                        text.pop();
                        true
                    }
                    _ => false,
                },
                FieldValue::Flag(on) => match key {
                    Key::Char(' ') | Key::Left | Key::Right => {
                        *on = !*on;
                        true
                    }
                    _ => false,
                },
                FieldValue::Choice { options, selected } => {
                    if options.is_empty() {
                        return false;
                    }
                    match key {
                        Key::Left => {
                            *selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
                            true
                        }
                        Key::Right | Key::Char(' ') => {
                            *selected = (*selected + 1) % options.len();
                            true
                        }
                        _ => false,
                    }
                }
            }
        }
    }

    /// Render fields one per row. The focused field gets the focus role and
    /// a block cursor on editable text.
    pub fn render_form(frame: &mut RenderFrame, rect: Rect, fields: &[FormField], focused: usize) {
        if rect.is_empty() {
            return;
        }
        let label_col = fields
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0) as u16
            + 2;
        for (i, field) in fields.iter().enumerate() {
            let y = rect.y + i as u16;
            if y >= rect.y + rect.height {
                break;
            }
            let is_focused = i == focused;
            let label_role = if is_focused {
                TextRole::Focus
            } else {
                TextRole::Muted
            };
            frame.draw_text_clipped(rect.x, y, rect.width, &field.label, label_role);
            let mut value = field.display_value();
            if is_focused && matches!(field.value, FieldValue::Text(_)) {
                value.push('█');
            }
            let value_x = rect.x + label_col.min(rect.width);
            let value_max = rect.width.saturating_sub(label_col);
            let value_role = if is_focused {
                TextRole::Default
            } else {
                TextRole::Muted
            };
            frame.draw_text_clipped(value_x, y, value_max, &value, value_role);
        }
    }
}

pub mod input {
    //! Backend-neutral key events and the shared navigation mapping.

    /// Keys the apps care about. Anything else is dropped at the runtime
    /// boundary before it reaches a view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Key {
        Char(char),
        Enter,
        Esc,
        Backspace,
        Tab,
        BackTab,
        Up,
        Down,
        Left,
        Right,
        Home,
        End,
        PageUp,
        PageDown,
        Delete,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers {
        pub ctrl: bool,
        pub alt: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyEvent {
        pub key: Key,
        pub modifiers: Modifiers,
    }

    impl KeyEvent {
        #[must_use]
        pub fn plain(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers::default(),
            }
        }

        #[must_use]
        pub fn ctrl(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers {
                    ctrl: true,
                    alt: false,
                },
            }
        }

        #[must_use]
        pub fn is_char(&self, ch: char) -> bool {
            !self.modifiers.ctrl && !self.modifiers.alt && self.key == Key::Char(ch)
        }
    }

    /// Everything a runtime can feed an app.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputEvent {
        Key(KeyEvent),
        /// Periodic heartbeat; drives delayed refreshes and clock updates.
        Tick,
        Resize(u16, u16),
    }

    /// List-navigation intents shared by every view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UiAction {
        MoveUp,
        MoveDown,
        MoveLeft,
        MoveRight,
        PageUp,
        PageDown,
        Home,
        End,
        Activate,
        Back,
    }

    /// Arrows plus the vim home row. Modified keys never navigate.
    #[must_use]
    pub fn translate_nav(event: KeyEvent) -> Option<UiAction> {
        if event.modifiers.ctrl || event.modifiers.alt {
            return None;
        }
        match event.key {
            Key::Up | Key::Char('k') => Some(UiAction::MoveUp),
            Key::Down | Key::Char('j') => Some(UiAction::MoveDown),
            Key::Left | Key::Char('h') => Some(UiAction::MoveLeft),
            Key::Right | Key::Char('l') => Some(UiAction::MoveRight),
            Key::PageUp => Some(UiAction::PageUp),
            Key::PageDown => Some(UiAction::PageDown),
            Key::Home => Some(UiAction::Home),
            Key::End => Some(UiAction::End),
            Key::Enter => Some(UiAction::Activate),
            Key::Esc => Some(UiAction::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::crate_label;
    use super::input::{translate_nav, Key, KeyEvent, UiAction};
    use super::render::{Rect, RenderFrame};
    use super::style::{TextRole, Theme, ThemeKind};
    use super::widgets::{centered_rect, clip, render_form, BorderStyle, FormField};

    fn frame(width: u16, height: u16) -> RenderFrame {
        RenderFrame::new(width, height, Theme::for_kind(ThemeKind::Dark))
    }

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "rentease-tui-adapter");
    }

    #[test]
    fn theme_palettes_differ_per_kind() {
        let dark = Theme::for_kind(ThemeKind::Dark);
        let light = Theme::for_kind(ThemeKind::Light);
        assert_ne!(dark.tokens.bg, light.tokens.bg);
        assert_ne!(dark.tokens.fg, light.tokens.fg);
    }

    #[test]
    fn theme_kind_label_parse_is_lenient() {
        assert_eq!(ThemeKind::from_label(" LIGHT "), ThemeKind::Light);
        assert_eq!(ThemeKind::from_label("noir"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_label(""), ThemeKind::Dark);
    }

    #[test]
    fn draw_text_lands_in_row_text() {
        let mut f = frame(20, 3);
        f.draw_text(2, 1, "hello", TextRole::Default);
        assert_eq!(f.row_text(1), "  hello");
        assert_eq!(f.row_text(0), "");
    }

    #[test]
    fn draw_text_stops_at_the_right_edge() {
        let mut f = frame(6, 1);
        f.draw_text(4, 0, "abcdef", TextRole::Default);
        assert_eq!(f.row_text(0), "    ab");
    }

    #[test]
    fn clipping_marks_truncation_with_tilde() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("exactly10!", 10), "exactly10!");
        assert_eq!(clip("longer than that", 7), "longer~");
        assert_eq!(clip("abc", 0), "");
    }

    #[test]
    fn panel_draws_border_title_and_returns_inner() {
        let mut f = frame(12, 4);
        let inner = f.draw_panel(Rect::new(0, 0, 12, 4), Some("Users"), BorderStyle::Plain);
        assert_eq!(inner, Rect::new(1, 1, 10, 2));
        assert_eq!(f.row_text(0), "┌ Users ───┐");
        assert!(f.row_text(3).starts_with('└'));
        assert!(f.row_text(1).starts_with('│'));
    }

    #[test]
    fn narrow_panel_collapses_to_empty_inner() {
        let mut f = frame(10, 4);
        let inner = f.draw_panel(Rect::new(0, 0, 1, 4), None, BorderStyle::Plain);
        assert!(inner.is_empty());
    }

    #[test]
    fn highlight_span_keeps_glyphs_and_raises_background() {
        let mut f = frame(10, 1);
        f.draw_text(0, 0, "row", TextRole::Default);
        f.highlight_span(0, 0, 10);
        assert_eq!(f.row_text(0), "row");
        let cell = f.cell(1, 0).expect("cell");
        assert_eq!(cell.style.bg, f.theme().tokens.surface);
        assert!(cell.style.bold);
    }

    #[test]
    fn rect_splits_partition_exactly() {
        let area = Rect::new(0, 0, 80, 24);
        let (top, rest) = area.split_top(2);
        assert_eq!(top.height, 2);
        assert_eq!(rest, Rect::new(0, 2, 80, 22));
        let (body, footer) = rest.split_bottom(1);
        assert_eq!(footer, Rect::new(0, 23, 80, 1));
        assert_eq!(body.height, 21);
        let (left, right) = body.split_left(30);
        assert_eq!(left.width, 30);
        assert_eq!(right.x, 30);
        assert_eq!(right.width, 50);
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 40, 10);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
        let oversized = centered_rect(area, 200, 50);
        assert_eq!(oversized, area);
    }

    #[test]
    fn snapshot_joins_rows_with_newlines() {
        let mut f = frame(4, 2);
        f.draw_text(0, 0, "ab", TextRole::Default);
        f.draw_text(0, 1, "cd", TextRole::Default);
        assert_eq!(f.snapshot(), "ab\ncd");
    }

    #[test]
    fn text_field_edits_push_and_pop() {
        let mut field = FormField::text("Name", "Al");
        assert!(field.apply_key(Key::Char('i')));
        assert!(field.apply_key(Key::Char('!')));
        assert!(field.apply_key(Key::Backspace));
        assert_eq!(field.text_value(), "Ali");
        assert!(!field.apply_key(Key::Up), "navigation is not an edit");
    }

    #[test]
    fn flag_field_toggles_on_space_and_arrows() {
        let mut field = FormField::flag("Active", true);
        assert!(field.apply_key(Key::Char(' ')));
        assert!(!field.flag_value());
        assert!(field.apply_key(Key::Left));
        assert!(field.flag_value());
        assert_eq!(field.display_value(), "[x]");
    }

    #[test]
    fn choice_field_cycles_in_both_directions() {
        let mut field = FormField::choice("Role", &["user", "renter", "admin"], 0);
        assert!(field.apply_key(Key::Right));
        assert_eq!(field.selected_option(), Some("renter"));
        assert!(field.apply_key(Key::Left));
        assert!(field.apply_key(Key::Left));
        assert_eq!(field.selected_option(), Some("admin"));
        assert_eq!(field.display_value(), "‹ admin ›");
    }

    #[test]
    fn form_renders_labels_values_and_cursor() {
        let mut f = frame(30, 4);
        let fields = [
            FormField::text("Name", "Alice"),
            FormField::flag("Active", true),
        ];
        render_form(&mut f, Rect::new(0, 0, 30, 4), &fields, 0);
        assert_eq!(f.row_text(0), "Name    Alice█");
        assert_eq!(f.row_text(1), "Active  [x]");
    }

    #[test]
    fn nav_translation_covers_vim_and_arrows() {
        assert_eq!(
            translate_nav(KeyEvent::plain(Key::Char('j'))),
            Some(UiAction::MoveDown)
        );
        assert_eq!(
            translate_nav(KeyEvent::plain(Key::Up)),
            Some(UiAction::MoveUp)
        );
        assert_eq!(
            translate_nav(KeyEvent::plain(Key::Enter)),
            Some(UiAction::Activate)
        );
        assert_eq!(translate_nav(KeyEvent::ctrl(Key::Char('j'))), None);
        assert_eq!(translate_nav(KeyEvent::plain(Key::Char('q'))), None);
    }
}
