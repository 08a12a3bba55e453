//! Terminal initialization and geometry

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use facepick_core::config::PreviewConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Size of one character cell in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    pub fn from_config(preview: &PreviewConfig) -> Self {
        Self {
            width: preview.cell_width.max(1),
            height: preview.cell_height.max(1),
        }
    }
}

/// Initialize the terminal
pub fn init() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    Ok(())
}

/// Query the cell size, using `fallback` when the terminal reports no pixel size
pub fn cell_size(fallback: CellSize) -> CellSize {
    match crossterm::terminal::window_size() {
        Ok(size) => cell_size_from(size.columns, size.rows, size.width, size.height)
            .unwrap_or(fallback),
        Err(e) => {
            log::trace!("window size query failed: {e}");
            fallback
        }
    }
}

fn cell_size_from(columns: u16, rows: u16, width_px: u16, height_px: u16) -> Option<CellSize> {
    if columns == 0 || rows == 0 {
        return None;
    }
    let width = width_px / columns;
    let height = height_px / rows;
    if width == 0 || height == 0 {
        return None;
    }
    Some(CellSize { width, height })
}
