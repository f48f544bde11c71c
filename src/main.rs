//! refsheet - terminal cheat sheet viewer.
//!
//! Renders a fixed catalog of code snippets grouped into sections and
//! subsections, with a navigation sidebar whose highlight stays
//! synchronized with the scroll position, and an address fragment with
//! browser-like back/forward history.

mod app;
mod catalog;
mod content;
mod layout;
mod location;
mod scrollspy;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use app::App;
use catalog::Catalog;
use location::Location;

/// Frame rate for the smooth scroll animation (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    color_eyre::install().ok();

    // Arguments: a catalog JSON path, and/or a `#fragment` naming the
    // section to open at, like a shared anchor link. Load errors surface
    // before the terminal enters raw mode.
    let mut catalog_path = None;
    let mut fragment = None;
    for arg in std::env::args().skip(1) {
        match arg.strip_prefix('#') {
            Some(frag) => fragment = Some(frag.to_string()),
            None => catalog_path = Some(arg),
        }
    }

    let catalog = match catalog_path {
        Some(path) => Catalog::from_json_file(&path)?,
        None => content::builtin(),
    };
    let location = fragment
        .map(|frag| Location::with_fragment(&frag))
        .unwrap_or_default();

    run_tui(catalog, location)
}

fn run_tui(catalog: Catalog, location: Location) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_location(catalog, location);
    let result = run_event_loop(&mut terminal, &mut app);

    // Detach the spy before tearing the terminal down so nothing reacts
    // to events past this point
    app.spy.teardown();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let size = terminal.size()?;

        // Advance animations and derive this frame's visibility batch
        app.tick(size.height);

        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input events with a timeout so the animation keeps running
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
