//! Main content panels: the blocks and transactions lists.

pub mod details;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{App, Focus};
use crate::constants::{format_sol, truncate_id};
use crate::theme::{MUTED_COLOR, SECONDARY_COLOR, SELECTED_STYLE};
use crate::ui::helpers::create_border_block;

// ============================================================================
// Blocks Panel
// ============================================================================

/// Renders the recent blocks list.
pub fn render_blocks(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Blocks;
    let block = create_border_block("Recent Blocks", focused);

    let Ok(blocks) = app.blocks.try_lock() else {
        frame.render_widget(block, area);
        return;
    };

    let items: Vec<ListItem> = blocks
        .iter()
        .map(|b| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("slot {}", b.slot),
                        Style::default().fg(SECONDARY_COLOR),
                    ),
                    Span::styled(
                        format!("  {} txns", b.txn_count),
                        Style::default().fg(MUTED_COLOR),
                    ),
                ]),
                Line::from(Span::styled(
                    b.timestamp(),
                    Style::default().fg(MUTED_COLOR),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(SELECTED_STYLE);

    let mut list_state = app.block_list_state.clone();
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ============================================================================
// Transactions Panel
// ============================================================================

/// Renders the recent transactions list.
pub fn render_transactions(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Transactions;
    let block = create_border_block("Recent Transactions", focused);

    let Ok(transactions) = app.transactions.try_lock() else {
        frame.render_widget(block, area);
        return;
    };

    let items: Vec<ListItem> = transactions
        .iter()
        .map(|t| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(truncate_id(t.signature(), 24)),
                    Span::styled(
                        format!("  {}", t.status.as_str()),
                        Style::default().fg(t.status.color()),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("slot {}", t.slot),
                    Style::default().fg(MUTED_COLOR),
                )),
                Line::from(Span::styled(
                    format!("fee {}", format_sol(t.fee)),
                    Style::default().fg(MUTED_COLOR),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(SELECTED_STYLE);

    let mut list_state = app.transaction_list_state.clone();
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ============================================================================
// Tests
// ============================================================================
