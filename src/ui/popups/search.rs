//! Search popup rendering with filter selection.
//!
//! A modal input where the user types a query, cycles the result-type
//! filter with Tab, and gets live feedback on whether the input is
//! address- or signature-shaped.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::search::{SearchFilter, search_suggestion};
use crate::theme::{BORDER_STYLE, MUTED_COLOR, PRIMARY_COLOR, SUCCESS_COLOR, WARNING_COLOR};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

// ============================================================================
// Public API
// ============================================================================

/// Renders the search popup.
pub fn render(frame: &mut Frame, area: Rect, query: &str, filter: SearchFilter) {
    let popup_area = centered_popup_area(area, 68, 18);

    let popup_block = create_popup_block("Search Cluster");
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner_area = popup_block.inner(popup_area);
    if inner_area.height < 12 || inner_area.width < 20 {
        return;
    }

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(BORDER_STYLE)
        .title(" Address or signature ")
        .title_alignment(Alignment::Left);

    let input_area = Rect::new(inner_area.x + 2, inner_area.y + 1, inner_area.width - 4, 3);
    frame.render_widget(input_block.clone(), input_area);

    let input_text = format!("{}▏", query);
    let input = Paragraph::new(input_text)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(input, input_block.inner(input_area));

    // Filter selector row
    let filters = [
        SearchFilter::All,
        SearchFilter::Transaction,
        SearchFilter::Address,
        SearchFilter::Token,
        SearchFilter::Program,
    ];
    let selector_y = input_area.y + 4;
    let selector_width = (inner_area.width.saturating_sub(4)) / filters.len() as u16;
    let mut x_offset = inner_area.x + 2;

    for f in &filters {
        let is_selected = *f == filter;
        let button_style = if is_selected {
            Style::default()
                .bg(PRIMARY_COLOR)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };

        let button_rect = Rect::new(x_offset, selector_y, selector_width.saturating_sub(1), 1);
        let button = Paragraph::new(f.as_str())
            .style(button_style)
            .alignment(Alignment::Center);
        frame.render_widget(button, button_rect);

        x_offset += selector_width;
    }

    // Live suggestion derived from the input shape
    let suggestion = search_suggestion(query, filter);
    let suggestion_color = if suggestion.contains("Valid") {
        SUCCESS_COLOR
    } else if suggestion.contains("Too ")
        || suggestion.contains("not a base58")
        || suggestion.contains("neither")
    {
        WARNING_COLOR
    } else {
        MUTED_COLOR
    };

    let suggestions_block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(MUTED_COLOR))
        .title(" Hint ")
        .title_alignment(Alignment::Left);
    let suggestions_area = Rect::new(
        inner_area.x + 2,
        selector_y + 2,
        inner_area.width - 4,
        4,
    );
    frame.render_widget(suggestions_block.clone(), suggestions_area);

    let suggestion_text = Paragraph::new(suggestion)
        .style(Style::default().fg(suggestion_color))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(suggestion_text, suggestions_block.inner(suggestions_area));

    let control_text = "Tab: Change Filter  Enter: Search  Esc: Cancel";
    let control_area = Rect::new(
        popup_area.x,
        popup_area.y + popup_area.height - 2,
        popup_area.width,
        1,
    );
    let control_msg = Paragraph::new(control_text)
        .style(Style::default().fg(MUTED_COLOR))
        .alignment(Alignment::Center);
    frame.render_widget(control_msg, control_area);
}

// ============================================================================
// Tests
// ============================================================================
