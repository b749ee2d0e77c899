//! Footer rendering for the lazysol TUI.
//!
//! The footer displays keyboard shortcuts at the bottom of the screen.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::app::App;
use crate::theme::MUTED_COLOR;

// ============================================================================
// Footer Rendering
// ============================================================================

/// Renders the footer bar with keyboard shortcuts.
pub fn render(frame: &mut Frame, area: Rect, _app: &App) {
    let footer_text =
        "q:Quit  /:Search  n:Cluster  r:Refresh  Space:Live  Tab:Focus  c:Copy  o:Open  ?:Help";
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(MUTED_COLOR))
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

// ============================================================================
// Tests
// ============================================================================
