//! Transaction detail view.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::constants::format_sol;
use crate::domain::Transaction;
use crate::theme::MUTED_COLOR;
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

use super::detail_line;

// ============================================================================
// Transaction Details
// ============================================================================

/// Renders the transaction detail view.
pub fn render_transaction_details(txn: &Transaction, frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup_area(area, 84, 24);
    let popup_block = create_popup_block("Transaction");

    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let mut lines = vec![
        detail_line("Signature", txn.signature().to_string()),
        Line::from(vec![
            Span::styled(
                "Status          ",
                Style::default().fg(crate::theme::SECONDARY_COLOR),
            ),
            Span::styled(
                txn.status.as_str().to_string(),
                Style::default().fg(txn.status.color()),
            ),
        ]),
        detail_line("Slot", txn.slot.to_string()),
        detail_line("Time", txn.timestamp()),
        detail_line("Fee", format_sol(txn.fee)),
    ];

    if let Some(err) = &txn.err {
        lines.push(detail_line("Error", err.clone()));
    }

    if txn.signatures.len() > 1 {
        for sig in txn.signatures.iter().skip(1) {
            lines.push(detail_line("Co-signature", sig.clone()));
        }
    }

    if !txn.account_keys.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("── Accounts ({}) ──", txn.account_keys.len()),
            Style::default().fg(MUTED_COLOR),
        )));
        for key in txn.account_keys.iter().take(6) {
            lines.push(Line::from(format!("  {}", key)));
        }
        if txn.account_keys.len() > 6 {
            lines.push(Line::from(Span::styled(
                format!("  ... and {} more", txn.account_keys.len() - 6),
                Style::default().fg(MUTED_COLOR),
            )));
        }
    }

    if !txn.instructions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("── Instructions ({}) ──", txn.instructions.len()),
            Style::default().fg(MUTED_COLOR),
        )));
        for (index, ix) in txn.instructions.iter().enumerate() {
            let program = ix
                .program_name
                .clone()
                .unwrap_or_else(|| ix.program_id.clone());
            lines.push(Line::from(format!(
                "  #{} {} ({} accounts)",
                index + 1,
                program,
                ix.account_count
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc: Close  c: Copy  o: Open in web explorer",
        Style::default().fg(MUTED_COLOR),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use crate::test_utils::{DomainMother, JsonMother};
    use ratatui::{Terminal, backend::TestBackend};

    fn render_to_string(txn: &Transaction) -> String {
        let backend = TestBackend::new(96, 28);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_transaction_details(txn, frame, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_successful_transaction_details() {
        let txn = Transaction::from_json(&JsonMother::transaction()).unwrap();
        let content = render_to_string(&txn);

        assert!(content.contains("5sigTransfer"));
        assert!(content.contains("Success"));
        assert!(content.contains("Accounts (3)"));
        assert!(content.contains("System Program"));
    }

    #[test]
    fn test_failed_transaction_shows_error() {
        let txn = DomainMother::failed_transaction("5sigBroken");
        let content = render_to_string(&txn);

        assert!(content.contains("Failed"));
        assert!(content.contains("InstructionError"));
    }
}
