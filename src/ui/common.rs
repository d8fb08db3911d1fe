//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, help overlay and the
//! terminal-too-small notice.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_duration;

/// Render the header bar.
///
/// Displays: liveness indicator, where endpoints are polled from, polling period.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let live = app.panels.iter().filter(|p| p.value.is_some()).count();
    let all_live = !app.panels.is_empty() && live == app.panels.len();

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.value_style(all_live)),
        Span::styled("STATUSBOARD ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description()),
        Span::raw(" │ every "),
        Span::raw(format_duration(app.interval())),
        Span::raw(" │ "),
        Span::styled(
            format!("{}/{}", live, app.panels.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" live"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: per-panel freshness and available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let freshness: Vec<String> = app
        .panels
        .iter()
        .map(|p| match p.value {
            Some(ref v) => format!("{} {}", p.label, format_duration(v.age())),
            None => format!("{} waiting", p.label),
        })
        .collect();

    let status = format!(
        " {} | Tab:focus ↑↓:scroll r:refresh e:export ?:help q:quit",
        freshness.join(" · ")
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render a notice asking for a bigger terminal.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, min_width, min_height
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    let top = (area.height / 2).saturating_sub(2);
    let centered = Rect::new(area.x, area.y + top, area.width, 5u16.min(area.height - top));
    frame.render_widget(paragraph, centered);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the panels.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Panels",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/←/→ h/l Switch focus"),
        Line::from("  1/2         Focus Agents/Messages"),
        Line::from("  ↑/↓ j/k     Scroll"),
        Line::from("  PgUp/PgDn   Scroll 10 lines"),
        Line::from("  Home/End    Jump to top/bottom"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
