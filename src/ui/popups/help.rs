//! Help popup rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::theme::{MUTED_COLOR, SECONDARY_COLOR};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

const BINDINGS: &[(&str, &str)] = &[
    ("q", "Quit"),
    ("/ or f", "Open search"),
    ("Tab", "Switch panel focus / cycle search filter"),
    ("Up/Down", "Move selection"),
    ("PgUp/PgDn", "Page through lists"),
    ("Enter", "Open details / submit search"),
    ("Esc", "Close popup or details"),
    ("n", "Select cluster"),
    ("r", "Refresh data"),
    ("Space", "Toggle live updates"),
    ("c", "Copy selected id"),
    ("o", "Open selected item in web explorer"),
    ("?", "This help"),
];

/// Renders the help popup with all keybindings.
pub fn render(frame: &mut Frame, area: Rect) {
    let height = (BINDINGS.len() as u16).saturating_add(5).min(22);
    let popup_area = centered_popup_area(area, 64, height);

    let popup_block = create_popup_block("Help");
    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", key), Style::default().fg(SECONDARY_COLOR)),
                Span::raw(*action),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter/Esc: Close",
        Style::default().fg(MUTED_COLOR),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, inner);
}
