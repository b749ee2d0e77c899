//! Message popup rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Clear, Paragraph, Wrap},
};

use crate::theme::{ERROR_COLOR, MUTED_COLOR};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

/// Renders a centered message popup. Messages prefixed with "Error:" are
/// styled as errors.
pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let height = (message.len() as u16 / 50).saturating_add(5).min(12);
    let popup_area = centered_popup_area(area, 56, height);

    let popup_block = create_popup_block("Message");
    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let style = if message.starts_with("Error:") {
        Style::default().fg(ERROR_COLOR)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(message.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let hint = Paragraph::new("Enter/Esc: Close")
        .style(Style::default().fg(MUTED_COLOR))
        .alignment(Alignment::Center);
    let hint_area = Rect::new(
        popup_area.x,
        popup_area.y + popup_area.height.saturating_sub(2),
        popup_area.width,
        1,
    );
    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_message_popup_renders_text() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| render(frame, frame.area(), "No results found."))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("No results found."));
    }
}
