//! Placing rendered samples on screen

use crate::kitty_graphics;
use anyhow::Result;
use crossterm::{cursor::MoveTo, queue};
use ratatui::layout::Rect;
use std::io::Write;
use std::path::PathBuf;

/// One sample image to show in a screen area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlacement {
    /// Stable per-pass id, starting at 1
    pub id: u32,
    pub path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
    pub area: Rect,
}

/// Shows the placements produced by a draw pass
pub trait ImageDisplay {
    /// Make `placements` the only images on screen
    fn show(&mut self, placements: &[ImagePlacement]) -> Result<()>;

    /// Remove everything this display put on screen
    fn clear(&mut self) -> Result<()>;

    /// Forget what is on screen so the next `show` places every image again.
    ///
    /// Called after the terminal wiped the screen, which also drops images.
    fn invalidate(&mut self) {}
}

/// Display for terminals without graphics support
#[derive(Debug, Default)]
pub struct NullDisplay;

impl ImageDisplay for NullDisplay {
    fn show(&mut self, _placements: &[ImagePlacement]) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Display using the kitty graphics protocol
pub struct KittyDisplay<W: Write> {
    out: W,
    shown: Vec<ImagePlacement>,
}

impl<W: Write> KittyDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: Vec::new(),
        }
    }

    fn delete_shown(&mut self) -> Result<()> {
        for placement in self.shown.drain(..) {
            self.out.write_all(&kitty_graphics::delete_image(placement.id)?)?;
        }
        Ok(())
    }
}

impl<W: Write> ImageDisplay for KittyDisplay<W> {
    fn show(&mut self, placements: &[ImagePlacement]) -> Result<()> {
        // Redraws happen on every wake-up; only touch the screen on change
        if self.shown == placements {
            return Ok(());
        }

        self.delete_shown()?;
        for placement in placements {
            queue!(self.out, MoveTo(placement.area.x, placement.area.y))?;
            let cmd = kitty_graphics::transmit_file(
                &placement.path,
                placement.width_px,
                placement.height_px,
                placement.id,
                placement.area.width,
                placement.area.height,
            )?;
            self.out.write_all(&cmd)?;
        }
        self.out.flush()?;

        self.shown = placements.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.delete_shown()?;
        self.out.flush()?;
        Ok(())
    }

    fn invalidate(&mut self) {
        self.shown.clear();
    }
}

/// Pick a display for the current terminal
pub fn detect() -> Box<dyn ImageDisplay> {
    if is_kitty() {
        log::info!("using kitty graphics protocol for previews");
        Box::new(KittyDisplay::new(std::io::stdout()))
    } else {
        log::info!("terminal has no known graphics support, previews show names only");
        Box::new(NullDisplay)
    }
}

/// Check if running in a terminal that speaks the kitty graphics protocol
fn is_kitty() -> bool {
    // Kitty sets TERM=xterm-kitty
    if let Ok(term) = std::env::var("TERM") {
        if term.contains("kitty") {
            return true;
        }
    }

    std::env::var("KITTY_WINDOW_ID").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(id: u32) -> ImagePlacement {
        ImagePlacement {
            id,
            path: PathBuf::from(format!("/tmp/{id}.rgba")),
            width_px: 800,
            height_px: 16,
            area: Rect::new(0, id as u16 * 3, 100, 1),
        }
    }

    #[test]
    fn test_kitty_display_writes_each_placement() {
        let mut display = KittyDisplay::new(Vec::new());
        display.show(&[placement(1), placement(2)]).unwrap();

        let out = String::from_utf8_lossy(&display.out).to_string();
        assert_eq!(out.matches("a=T").count(), 2);
        assert!(out.contains("i=1"));
        assert!(out.contains("i=2"));
    }

    #[test]
    fn test_kitty_display_skips_unchanged_pass() {
        let mut display = KittyDisplay::new(Vec::new());
        display.show(&[placement(1)]).unwrap();
        let len = display.out.len();

        display.show(&[placement(1)]).unwrap();
        assert_eq!(display.out.len(), len);
    }

    #[test]
    fn test_kitty_display_resends_after_invalidate() {
        let mut display = KittyDisplay::new(Vec::new());
        display.show(&[placement(1)]).unwrap();
        let len = display.out.len();

        // Screen wiped by a resize: same placements must be sent again
        display.invalidate();
        display.show(&[placement(1)]).unwrap();

        let redraw = String::from_utf8_lossy(&display.out[len..]).to_string();
        assert_eq!(redraw.matches("a=T").count(), 1);
        assert!(redraw.contains("i=1"));
        assert_eq!(display.shown, vec![placement(1)]);
    }

    #[test]
    fn test_kitty_display_replaces_previous_images() {
        let mut display = KittyDisplay::new(Vec::new());
        display.show(&[placement(1)]).unwrap();
        display.show(&[]).unwrap();

        let out = String::from_utf8_lossy(&display.out).to_string();
        assert!(out.contains("a=d,d=I,i=1"));
        assert!(display.shown.is_empty());
    }

    #[test]
    fn test_clear_deletes_shown() {
        let mut display = KittyDisplay::new(Vec::new());
        display.show(&[placement(1), placement(2)]).unwrap();
        display.clear().unwrap();

        let out = String::from_utf8_lossy(&display.out).to_string();
        assert_eq!(out.matches("a=d").count(), 2);
    }
}
