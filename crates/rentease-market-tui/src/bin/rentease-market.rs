//! Marketplace storefront binary. Interactive terminals get the full UI;
//! anything else gets a one-shot snapshot print, which keeps the binary
//! usable in pipes and CI.

use std::io::IsTerminal;

use rentease_core::store::Store;
use rentease_market_tui::app::App;
use rentease_market_tui::listings::REFRESH_DELAY_TICKS;
use rentease_market_tui::runtime;
use rentease_tui_adapter::input::InputEvent;
use rentease_tui_adapter::render::RenderFrame;
use rentease_tui_adapter::style::{Theme, ThemeKind};

fn main() {
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let result = if interactive {
        runtime::run()
    } else {
        print_snapshot()
    };
    if let Err(err) = result {
        eprintln!("rentease-market: {err}");
        std::process::exit(1);
    }
}

fn print_snapshot() -> Result<(), String> {
    let store_dir = rentease_market_tui::resolve_store_dir();
    let store = Store::open(&store_dir)
        .map_err(|err| format!("open store {}: {err}", store_dir.display()))?;
    let theme_label = std::env::var("RENTEASE_THEME").unwrap_or_else(|_| "dark".to_owned());
    let theme = Theme::for_kind(ThemeKind::from_label(&theme_label));
    let mut app = App::new(store).map_err(|err| format!("load marketplace data: {err}"))?;
    for _ in 0..REFRESH_DELAY_TICKS {
        app.handle_event(InputEvent::Tick);
    }
    let mut frame = RenderFrame::new(80, 24, theme);
    app.render(&mut frame);
    println!("{}", frame.snapshot());
    Ok(())
}
