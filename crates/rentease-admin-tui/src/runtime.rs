//! Interactive terminal loop: raw mode, event polling, cell painting.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event as TerminalEvent, KeyCode as TerminalKeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use rentease_core::store::Store;
use rentease_tui_adapter::input::{InputEvent, Key, KeyEvent, Modifiers};
use rentease_tui_adapter::render::RenderFrame;
use rentease_tui_adapter::style::{CellStyle, Theme, ThemeKind};

use crate::app::{App, Command};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub fn run() -> Result<(), String> {
    let mut terminal_session =
        TerminalSession::enter().map_err(|err| format!("enter tui terminal mode: {err}"))?;

    let store_dir = super::resolve_store_dir();
    let store = Store::open(&store_dir)
        .map_err(|err| format!("open store {}: {err}", store_dir.display()))?;
    let theme_label = std::env::var("RENTEASE_THEME").unwrap_or_else(|_| "dark".to_owned());
    let theme = Theme::for_kind(ThemeKind::from_label(&theme_label));
    let mut app = App::new(store).map_err(|err| format!("load admin data: {err}"))?;

    let (mut width, mut height) =
        terminal_size().map_err(|err| format!("read terminal size: {err}"))?;

    let mut dirty = true;
    let mut next_tick = Instant::now() + TICK_INTERVAL;

    loop {
        if dirty {
            let mut frame = RenderFrame::new(width, height, theme);
            app.render(&mut frame);
            paint_frame(&mut terminal_session.stdout, &frame)
                .map_err(|err| format!("render frame: {err}"))?;
            dirty = false;
        }

        let now = Instant::now();
        if now >= next_tick {
            if app.handle_event(InputEvent::Tick) == Command::Quit {
                break;
            }
            dirty = true;
            next_tick = Instant::now() + TICK_INTERVAL;
            continue;
        }

        let timeout = next_tick.saturating_duration_since(now);
        let has_event =
            event::poll(timeout).map_err(|err| format!("poll terminal event: {err}"))?;
        if !has_event {
            continue;
        }

        let event = event::read().map_err(|err| format!("read terminal event: {err}"))?;
        if is_interrupt(&event) {
            break;
        }

        if let Some(input) = map_terminal_event(event) {
            if let InputEvent::Resize(next_width, next_height) = input {
                width = next_width;
                height = next_height;
            }
            if app.handle_event(input) == Command::Quit {
                break;
            }
            dirty = true;
        }
    }

    Ok(())
}

fn terminal_size() -> io::Result<(u16, u16)> {
    terminal::size()
}

fn map_terminal_event(event: TerminalEvent) -> Option<InputEvent> {
    match event {
        TerminalEvent::Resize(width, height) => Some(InputEvent::Resize(width, height)),
        TerminalEvent::Key(key_event) => {
            if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return None;
            }

            let key = match key_event.code {
                TerminalKeyCode::Char(ch) => Key::Char(ch),
                TerminalKeyCode::Enter => Key::Enter,
                TerminalKeyCode::Esc => Key::Esc,
                TerminalKeyCode::Tab => Key::Tab,
                TerminalKeyCode::BackTab => Key::BackTab,
                TerminalKeyCode::Backspace => Key::Backspace,
                TerminalKeyCode::Delete => Key::Delete,
                TerminalKeyCode::Up => Key::Up,
                TerminalKeyCode::Down => Key::Down,
                TerminalKeyCode::Left => Key::Left,
                TerminalKeyCode::Right => Key::Right,
                TerminalKeyCode::Home => Key::Home,
                TerminalKeyCode::End => Key::End,
                TerminalKeyCode::PageUp => Key::PageUp,
                TerminalKeyCode::PageDown => Key::PageDown,
                _ => return None,
            };

            let modifiers = Modifiers {
                ctrl: key_event.modifiers.contains(KeyModifiers::CONTROL),
                alt: key_event.modifiers.contains(KeyModifiers::ALT),
            };

            Some(InputEvent::Key(KeyEvent { key, modifiers }))
        }
        _ => None,
    }
}

fn is_interrupt(event: &TerminalEvent) -> bool {
    let TerminalEvent::Key(key_event) = event else {
        return false;
    };

    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return false;
    }

    matches!(key_event.code, TerminalKeyCode::Char('c'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
}

fn paint_frame<W: Write>(out: &mut W, frame: &RenderFrame) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    for y in 0..frame.height() {
        queue!(out, MoveTo(0, y))?;
        let mut style = None;
        for x in 0..frame.width() {
            if let Some(cell) = frame.cell(x, y) {
                if style != Some(cell.style) {
                    queue_style(out, cell.style)?;
                    style = Some(cell.style);
                }
                queue!(out, Print(cell.ch))?;
            }
        }
    }

    queue!(
        out,
        SetAttribute(Attribute::Reset),
        MoveTo(0, frame.height())
    )?;
    out.flush()
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(Color::AnsiValue(style.fg)),
        SetBackgroundColor(Color::AnsiValue(style.bg)),
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    } else if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    } else {
        queue!(out, SetAttribute(Attribute::NormalIntensity))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    } else {
        queue!(out, SetAttribute(Attribute::NoUnderline))?;
    }
    Ok(())
}

struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            LeaveAlternateScreen,
            Show,
            MoveTo(0, 0)
        );
        let _ = terminal::disable_raw_mode();
    }
}
