//! Face preview pane: header text and preview layout

use crate::terminal::CellSize;
use crate::theme::Theme;
use facepick_core::{PreviewKey, RenderSettings, StyleSlot};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const INSTRUCTIONS: &str = "Press Enter to select this font, Esc to go back to the font list \
or any of the highlighted keys below to fine-tune the appearance of the individual font styles.";

/// Sample text wants roughly this many cells of width per preview
const SAMPLE_CELLS: i32 = 100;

/// Family being previewed and the settings its previews are rendered from
#[derive(Debug, Clone, Default)]
pub struct FacePreviewState {
    pub family: String,
    pub settings: RenderSettings,
}

/// Cache key and preview height for the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewGeometry {
    pub key: PreviewKey,
    /// Rows each sample image occupies
    pub num_lines: u16,
}

/// Screen rows used by one style slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewRow {
    pub slot: StyleSlot,
    pub title: Rect,
    pub image: Option<Rect>,
}

/// Title, blank line, instructions wrapped to `width`, blank line
pub fn header_lines(family: &str, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let words: Vec<(String, Style)> = INSTRUCTIONS
        .split_whitespace()
        .map(|word| {
            let style = match word {
                "Enter" => theme.accept_key,
                "Esc" => theme.back_key,
                "highlighted" => theme.slot_key,
                _ => theme.base,
            };
            (word.to_string(), style)
        })
        .collect();

    let mut lines = vec![
        Line::from(Span::styled(family.to_string(), theme.title)),
        Line::default(),
    ];
    lines.extend(wrap_words(&words, width));
    lines.push(Line::default());
    lines
}

/// Greedy word wrap that keeps each word's style
pub fn wrap_words(words: &[(String, Style)], width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for (word, style) in words {
        let w = word.width();
        if !spans.is_empty() && used + 1 + w > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
            used += 1;
        }
        spans.push(Span::styled(word.clone(), *style));
        used += w;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Work out the preview cache key for a pane of `cols` x `rows` cells
pub fn preview_geometry(
    settings: &RenderSettings,
    cols: u16,
    rows: u16,
    header_rows: u16,
    cell: CellSize,
) -> PreviewGeometry {
    let per_font = ((rows as i32 - header_rows as i32 - 1) / 4) - 2;
    let needed = if cols == 0 {
        1
    } else {
        (SAMPLE_CELLS + cols as i32 - 1) / cols as i32
    };
    let num_lines = per_font.min(needed).max(1) as u16;

    let key = PreviewKey::new(
        settings.clone(),
        cols as u32 * cell.width as u32,
        num_lines as u32 * cell.height as u32,
    );
    PreviewGeometry { key, num_lines }
}

/// Lay out title and image rows for every slot that fits below the header
pub fn preview_rows(area: Rect, header_rows: u16, num_lines: u16) -> Vec<PreviewRow> {
    let mut rows = Vec::new();
    let mut y = header_rows;

    for slot in StyleSlot::ALL {
        if area.height.saturating_sub(y) < num_lines + 1 {
            continue;
        }
        let title = Rect::new(area.x, area.y + y, area.width, 1);
        y += 1;

        let image = if y + num_lines < area.height {
            let rect = Rect::new(area.x, area.y + y, area.width, num_lines);
            y += num_lines + 1;
            Some(rect)
        } else {
            None
        };

        rows.push(PreviewRow { slot, title, image });
    }
    rows
}
