//! Search results popup rendering.
//!
//! Lists classified results with their kind tags; Enter opens the
//! type-specific detail view.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::SearchResultsState;
use crate::constants::{format_sol, truncate_id};
use crate::domain::SearchResult;
use crate::theme::{MUTED_COLOR, SECONDARY_COLOR, SELECTED_STYLE};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

// ============================================================================
// Public API
// ============================================================================

/// Renders the search results popup.
pub fn render(frame: &mut Frame, area: Rect, state: &SearchResultsState) {
    let popup_area = centered_popup_area(area, 76, 18);

    let title = format!("Search Results ({})", state.results.len());
    let popup_block = create_popup_block(&title);
    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let items: Vec<ListItem> = state.results.iter().map(result_item).collect();

    let list = List::new(items)
        .highlight_style(SELECTED_STYLE.add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_index));

    let list_area = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(3),
    );
    frame.render_stateful_widget(list, list_area, &mut list_state);

    let hint = Paragraph::new("Up/Down: Select  Enter: Details  Esc: Close")
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

/// One list entry: kind tag, id, and a kind-specific summary column.
fn result_item(result: &SearchResult) -> ListItem<'static> {
    let tag = Span::styled(
        format!("[{:<11}] ", result.kind_label()),
        Style::default().fg(SECONDARY_COLOR),
    );

    let summary = match result {
        SearchResult::Transaction(txn) => Span::styled(
            format!("  {} slot {}", txn.status.as_str(), txn.slot),
            Style::default().fg(txn.status.color()),
        ),
        SearchResult::Account(account) => {
            let label = if account.is_vote_account() {
                format!("  {} (vote account)", format_sol(account.lamports))
            } else {
                format!("  {}", format_sol(account.lamports))
            };
            Span::styled(label, Style::default().fg(MUTED_COLOR))
        }
        SearchResult::Token(token) => Span::styled(
            format!("  mint {}", truncate_id(&token.mint.address, 12)),
            Style::default().fg(MUTED_COLOR),
        ),
        SearchResult::Program(program) => {
            let authority = program
                .authority
                .as_deref()
                .map(|a| truncate_id(a, 12))
                .unwrap_or_else(|| "immutable".to_string());
            Span::styled(
                format!("  authority {}", authority),
                Style::default().fg(MUTED_COLOR),
            )
        }
    };

    ListItem::new(Line::from(vec![
        tag,
        Span::raw(truncate_id(result.id(), 40)),
        summary,
    ]))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::classify_payload;
    use crate::test_utils::JsonMother;
    use ratatui::{Terminal, backend::TestBackend};

    fn state_of(payloads: Vec<serde_json::Value>) -> SearchResultsState {
        let results = payloads
            .iter()
            .filter_map(|p| classify_payload(p).unwrap())
            .collect::<Vec<_>>();
        SearchResultsState {
            results,
            selected_index: 0,
        }
    }

    #[test]
    fn test_results_popup_shows_kind_tags() {
        let state = state_of(vec![
            JsonMother::transaction(),
            JsonMother::token_account(),
            JsonMother::program_account(),
            JsonMother::base_account(),
        ]);

        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(content.contains("Search Results (4)"));
        assert!(content.contains("[Transaction]"));
        assert!(content.contains("[Token"));
        assert!(content.contains("[Program"));
        assert!(content.contains("[Account"));
    }

    #[test]
    fn test_vote_account_is_tagged_in_list() {
        let state = state_of(vec![JsonMother::vote_account()]);

        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        // Vote accounts list as accounts, not programs
        assert!(content.contains("[Account"));
        assert!(content.contains("vote account"));
        assert!(!content.contains("[Program"));
    }
}
