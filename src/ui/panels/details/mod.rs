//! Detail views: the presentation adapters for classified results.
//!
//! Each classified kind gets its own renderer; the router here picks one
//! based on what the user is viewing.

pub mod account;
pub mod transaction;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::domain::SearchResult;
use crate::theme::{MUTED_COLOR, SECONDARY_COLOR};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

// ============================================================================
// Detail Routing
// ============================================================================

/// Renders whichever detail view is active, if any.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.viewing_search_result_details {
        match &app.detailed_search_result {
            Some(SearchResult::Transaction(txn)) => {
                transaction::render_transaction_details(txn, frame, area);
            }
            Some(SearchResult::Account(acc)) => {
                account::render_account_details(acc, app.validator_panel.as_ref(), frame, area);
            }
            Some(SearchResult::Token(token)) => {
                account::render_token_details(token, frame, area);
            }
            Some(SearchResult::Program(program)) => {
                account::render_program_details(program, frame, area);
            }
            None => {}
        }
        return;
    }

    if app.show_transaction_details {
        if let Some(index) = app.transaction_list_state.selected()
            && let Ok(transactions) = app.transactions.try_lock()
            && let Some(txn) = transactions.get(index)
        {
            transaction::render_transaction_details(txn, frame, area);
        }
        return;
    }

    if app.show_block_details {
        if let Some(index) = app.block_list_state.selected()
            && let Ok(blocks) = app.blocks.try_lock()
            && let Some(block) = blocks.get(index)
        {
            render_block_details(block, frame, area);
        }
    }
}

// ============================================================================
// Block Details
// ============================================================================

fn render_block_details(block: &crate::domain::BlockInfo, frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup_area(area, 70, 12);
    let popup_title = format!("Block {}", block.slot);
    let popup_block = create_popup_block(&popup_title);

    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let lines = vec![
        detail_line("Slot", block.slot.to_string()),
        detail_line("Blockhash", block.blockhash.clone()),
        detail_line("Parent Slot", block.parent_slot.to_string()),
        detail_line("Transactions", block.txn_count.to_string()),
        detail_line("Time", block.timestamp()),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: Close  c: Copy  o: Open in web explorer",
            Style::default().fg(MUTED_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// A labeled detail line in the shared key/value style.
pub(crate) fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<16}", label),
            Style::default().fg(SECONDARY_COLOR),
        ),
        Span::raw(value),
    ])
}
