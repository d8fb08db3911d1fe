//! Terminal rendering.
//!
//! The screen is a one-line header, the panels stacked vertically with equal
//! heights, and a one-line status bar. The help overlay is drawn on top.

pub mod common;
pub mod panel;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::App;

/// Minimum terminal width for usable display.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for usable display.
pub const MIN_HEIGHT: u16 = 12;

/// Where each part of the screen goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub panels: Vec<Rect>,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, panel_count: usize) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header bar
            Constraint::Min(8),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let panels = if panel_count == 0 {
            Vec::new()
        } else {
            let count = panel_count as u32;
            Layout::vertical((0..panel_count).map(|_| Constraint::Ratio(1, count)))
                .split(chunks[1])
                .to_vec()
        };

        Self {
            header: chunks[0],
            panels,
            status: chunks[2],
        }
    }

    /// Index of the panel containing the given cell.
    pub fn panel_at(&self, column: u16, row: u16) -> Option<usize> {
        self.panels.iter().position(|r| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
    }
}

/// Whether `area` is large enough to draw the dashboard.
pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Draw the whole dashboard for the current App state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if !fits(area) {
        common::render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = ScreenLayout::new(area, app.panels.len());

    common::render_header(frame, app, layout.header);

    for (i, (panel, rect)) in app.panels.iter().zip(layout.panels.iter()).enumerate() {
        panel::render(frame, app, panel, i == app.focused, *rect);
    }

    common::render_status_bar(frame, app, layout.status);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
