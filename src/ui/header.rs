//! Header rendering for the lazysol TUI.
//!
//! The header shows the app name, the selected cluster, the current slot
//! height, and the live-updates indicator.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::theme::{MUTED_COLOR, PRIMARY_COLOR, SUCCESS_COLOR, WARNING_COLOR};

// ============================================================================
// Header Rendering
// ============================================================================

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::BOTTOM);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(24),
        ])
        .split(block.inner(area));

    frame.render_widget(block, area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "lazysol",
            Style::default()
                .fg(PRIMARY_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Left);
    frame.render_widget(logo, chunks[0]);

    let cluster_line = if app.current_slot > 0 {
        Line::from(vec![
            Span::styled(
                app.settings.selected_cluster.as_str().to_string(),
                Style::default().fg(SUCCESS_COLOR),
            ),
            Span::styled(
                format!("  slot {}", app.current_slot),
                Style::default().fg(MUTED_COLOR),
            ),
        ])
    } else {
        Line::from(Span::styled(
            app.settings.selected_cluster.as_str().to_string(),
            Style::default().fg(MUTED_COLOR),
        ))
    };
    let cluster = Paragraph::new(cluster_line).alignment(Alignment::Center);
    frame.render_widget(cluster, chunks[1]);

    let live = app
        .show_live
        .try_lock()
        .map(|guard| *guard)
        .unwrap_or(true);
    let live_span = if live {
        Span::styled("● LIVE", Style::default().fg(SUCCESS_COLOR))
    } else {
        Span::styled("◌ PAUSED", Style::default().fg(WARNING_COLOR))
    };
    let indicator = Paragraph::new(Line::from(live_span)).alignment(Alignment::Right);
    frame.render_widget(indicator, chunks[2]);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_header_shows_app_name_and_cluster() {
        let app = App::new(None);
        let backend = TestBackend::new(80, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| render_header(frame, frame.area(), &app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("lazysol"));
        assert!(content.contains(app.settings.selected_cluster.as_str()));
        assert!(content.contains("LIVE"));
    }
}
