//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for a panel that has received a value.
    pub live: Color,
    /// Color for borders of unfocused panels.
    pub border: Color,
    /// Style for section titles.
    pub header: Style,
    /// Style for panel text.
    pub body: Style,
    /// Style for panels still waiting on their first value.
    pub waiting: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            live: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            body: Style::default().fg(Color::White),
            waiting: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            live: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            body: Style::default().fg(Color::Black),
            waiting: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Border style for a panel, brighter when focused.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for a panel's indicator dot and text, depending on whether it has a value.
    pub fn value_style(&self, has_value: bool) -> Style {
        if has_value {
            Style::default().fg(self.live)
        } else {
            self.waiting
        }
    }
}
