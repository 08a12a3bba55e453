//! Theme system for dark/light modes

use facepick_core::config::ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    pub title: Style,
    /// The key letter inside a style label
    pub slot_key: Style,
    pub accept_key: Style,
    pub back_key: Style,
    pub list_selected: Style,
    pub hint: Style,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub error: Style,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White),
            title: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            slot_key: Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            accept_key: Style::default().fg(Color::LightGreen),
            back_key: Style::default().fg(Color::LightRed),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::LightBlue,
            error: Style::default().fg(Color::White).bg(Color::Red),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black),
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            slot_key: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            accept_key: Style::default().fg(Color::Green),
            back_key: Style::default().fg(Color::Red),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            hint: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            error: Style::default().fg(Color::White).bg(Color::Red),
        }
    }
}
