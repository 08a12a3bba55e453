//! facepick TUI - Terminal user interface components
//!
//! This crate contains all ratatui/crossterm integration:
//! - App state and pane switching
//! - Event loop, input handling and wake-ups from render jobs
//! - Rendering of the listing, preview and detail panes
//! - Placing preview images on screen

pub mod app;
pub mod display;
pub mod event;
pub mod faces;
pub mod input;
pub mod kitty_graphics;
pub mod terminal;
pub mod theme;
pub mod ui;

use anyhow::{Context, Result};
use crossterm::event::KeyEventKind;
use display::ImageDisplay;
use event::{AppEvent, EventReader};
use facepick_core::WakeReceiver;
use input::Action;
use terminal::CellSize;

// Re-export main types
pub use app::App;

/// Run the TUI application
pub fn run(app: &mut App, wakeups: &WakeReceiver, display: &mut dyn ImageDisplay) -> Result<()> {
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    let result = run_loop(&mut terminal, app, wakeups, display);

    if let Err(e) = display.clear() {
        log::warn!("failed to remove preview images: {e}");
    }
    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(
    terminal: &mut terminal::Tui,
    app: &mut App,
    wakeups: &WakeReceiver,
    display: &mut dyn ImageDisplay,
) -> Result<()> {
    let events = EventReader::spawn();
    let fallback_cell = CellSize::from_config(&app.config.preview);

    loop {
        app.cell_size = terminal::cell_size(fallback_cell);
        app.poll_worker_error();

        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        if let Err(e) = display.show(&app.placements) {
            log::warn!("failed to display previews: {e}");
        }

        if app.should_quit {
            break;
        }

        let stop = crossbeam_channel::select! {
            recv(events.receiver()) -> event => match event {
                Ok(event) => handle_event(app, event, display)?,
                Err(_) => {
                    log::error!("input reader stopped");
                    true
                }
            },
            recv(wakeups.receiver()) -> _ => {
                // A render finished; the next draw re-derives the key and re-queries
                wakeups.drain();
                false
            }
        };
        if stop {
            break;
        }
    }

    Ok(())
}

/// Apply one terminal event; returns true when the loop should stop
pub fn handle_event(app: &mut App, event: AppEvent, display: &mut dyn ImageDisplay) -> Result<bool> {
    match event {
        AppEvent::Input(key) => {
            // Only handle key press events, ignore release
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            Ok(input::handle_input(app, key)? == Action::Quit)
        }
        AppEvent::Resize(cols, rows) => {
            // The next draw clears the screen, taking the images with it
            log::debug!("terminal resized to {cols}x{rows}");
            display.invalidate();
            Ok(false)
        }
    }
}
