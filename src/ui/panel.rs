//! Panel rendering.
//!
//! Each panel is a bordered block titled with its label and endpoint,
//! containing the pretty-printed JSON of its current value.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Panel};
use crate::data::duration::format_duration;

/// Render one panel into `area`.
pub fn render(frame: &mut Frame, app: &App, panel: &Panel, focused: bool, area: Rect) {
    let theme = &app.theme;

    let mut title = vec![
        Span::styled(format!(" {} ", panel.label), theme.header),
        Span::styled(
            format!("{} ", panel.endpoint().target()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    if let Some(ref value) = panel.value {
        title.push(Span::styled(
            format!("· {} ago ", format_duration(value.age())),
            theme.value_style(true),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(focused));

    let body_style = if panel.value.is_some() {
        theme.body
    } else {
        theme.waiting
    };

    let paragraph = Paragraph::new(panel.text())
        .style(body_style)
        .block(block)
        .scroll((panel.scroll, 0));

    frame.render_widget(paragraph, area);
}
