use std::io::IsTerminal;

use rentease_admin_tui::app::App;
use rentease_admin_tui::{resolve_store_dir, runtime};
use rentease_core::store::Store;
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
        eprintln!("rentease-admin: {err}");
        std::process::exit(1);
    }
}

/// Non-terminal fallback: render one 80x24 frame and print it.
fn print_snapshot() -> Result<(), String> {
    let store_dir = resolve_store_dir();
    let store = Store::open(&store_dir)
        .map_err(|err| format!("open store {}: {err}", store_dir.display()))?;
    let theme_label = std::env::var("RENTEASE_THEME").unwrap_or_else(|_| "dark".to_owned());
    let theme = Theme::for_kind(ThemeKind::from_label(&theme_label));

    let app = App::new(store).map_err(|err| format!("load admin data: {err}"))?;
    let mut frame = RenderFrame::new(80, 24, theme);
    app.render(&mut frame);
    println!("{}", frame.snapshot());
    Ok(())
}
