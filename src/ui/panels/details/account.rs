//! Account detail views: base accounts, token accounts, programs, and the
//! validator view with its second-stage augmentation panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::ValidatorPanel;
use crate::constants::format_sol;
use crate::domain::{AccountSummary, ProgramAccountInfo, TokenAccountInfo};
use crate::theme::{ERROR_COLOR, MUTED_COLOR, SUCCESS_COLOR, WARNING_COLOR};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

use super::detail_line;

// ============================================================================
// Base Account / Validator Details
// ============================================================================

/// Renders the account detail view.
///
/// Vote accounts get the validator sections appended; the base fields
/// always render, regardless of whether the augmentation has loaded.
pub fn render_account_details(
    account: &AccountSummary,
    validator_panel: Option<&(String, ValidatorPanel)>,
    frame: &mut Frame,
    area: Rect,
) {
    let title = if account.is_vote_account() {
        "Vote Account"
    } else if account.mint_details.is_some() {
        "Mint Account"
    } else {
        "Account"
    };

    let popup_area = centered_popup_area(area, 78, 26);
    let popup_block = create_popup_block(title);

    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let mut lines = vec![
        detail_line("Address", account.address.clone()),
        detail_line("Balance", format_sol(account.lamports)),
        detail_line(
            "Owner",
            account.owner.clone().unwrap_or_else(|| "-".to_string()),
        ),
        detail_line("Executable", account.executable.to_string()),
        detail_line("Rent Epoch", account.rent_epoch.to_string()),
    ];
    if let Some(space) = account.space {
        lines.push(detail_line("Data Size", format!("{} bytes", space)));
    }

    if let Some(mint) = &account.mint_details {
        lines.push(Line::from(""));
        lines.push(section_header("Mint"));
        lines.push(detail_line("Supply", mint.supply.clone()));
        lines.push(detail_line("Decimals", mint.decimals.to_string()));
        lines.push(detail_line(
            "Mint Authority",
            mint.mint_authority.clone().unwrap_or_else(|| "-".to_string()),
        ));
        lines.push(detail_line(
            "Freeze Authority",
            mint.freeze_authority
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ));
    }

    if let Some(vote_state) = &account.vote_state {
        lines.push(Line::from(""));
        lines.push(section_header("Validator"));
        lines.push(detail_line("Identity", vote_state.node.clone()));
        lines.push(detail_line(
            "Commission",
            format!("{}%", vote_state.commission),
        ));
        if let Some(root_slot) = vote_state.root_slot {
            lines.push(detail_line("Root Slot", root_slot.to_string()));
        }
        if let Some(credits) = vote_state.latest_epoch_credits() {
            lines.push(detail_line("Epoch Credits", credits.to_string()));
        }
        for vote in vote_state.votes.iter().rev().take(3) {
            lines.push(detail_line(
                "Vote",
                format!("slot {} ({} conf)", vote.slot, vote.confirmation_count),
            ));
        }

        lines.push(Line::from(""));
        lines.extend(validator_panel_lines(validator_panel));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc: Close  c: Copy  o: Open in web explorer",
        Style::default().fg(MUTED_COLOR),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// The augmentation section: loading, loaded history, or the visible
/// degradation notice.
fn validator_panel_lines(
    validator_panel: Option<&(String, ValidatorPanel)>,
) -> Vec<Line<'static>> {
    let Some((_, panel)) = validator_panel else {
        return Vec::new();
    };

    match panel {
        ValidatorPanel::Loading => vec![Line::from(Span::styled(
            "Loading validator details...",
            Style::default().fg(MUTED_COLOR),
        ))],
        ValidatorPanel::Failed(message) => vec![Line::from(Span::styled(
            format!("Failed to load validator details: {}", message),
            Style::default().fg(WARNING_COLOR),
        ))],
        ValidatorPanel::Loaded(details) => {
            let mut lines = vec![section_header("History")];
            for sample in details.performance.iter().rev().take(3) {
                lines.push(detail_line(
                    "Epoch",
                    format!(
                        "{}: {}/{} blocks ({:.1}%)",
                        sample.epoch,
                        sample.blocks_produced,
                        sample.leader_slots,
                        sample.production_rate() * 100.0
                    ),
                ));
            }
            if let Some(latest) = details.vote_history.last() {
                lines.push(detail_line(
                    "Latest Vote",
                    format!("slot {}", latest.slot),
                ));
            }
            lines
        }
    }
}

// ============================================================================
// Token Account Details
// ============================================================================

/// Renders the token account detail view.
pub fn render_token_details(token: &TokenAccountInfo, frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup_area(area, 78, 16);
    let popup_block = create_popup_block("Token Account");

    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let amount = match token.ui_amount() {
        Some(ui) => format!("{} ({} base units)", ui, token.amount),
        None => token.amount.clone(),
    };

    let state_color = if token.state == "frozen" {
        ERROR_COLOR
    } else {
        SUCCESS_COLOR
    };

    let lines = vec![
        detail_line("Address", token.address.clone()),
        detail_line("Mint", token.mint.address.clone()),
        detail_line("Owner", token.owner.clone()),
        detail_line("Amount", amount),
        Line::from(vec![
            Span::styled("State           ", Style::default().fg(crate::theme::SECONDARY_COLOR)),
            Span::styled(token.state.clone(), Style::default().fg(state_color)),
        ]),
        detail_line("Rent Deposit", format_sol(token.lamports)),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: Close  c: Copy  o: Open in web explorer",
            Style::default().fg(MUTED_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

// ============================================================================
// Program Account Details
// ============================================================================

/// Renders the program account detail view.
pub fn render_program_details(program: &ProgramAccountInfo, frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup_area(area, 78, 14);
    let popup_block = create_popup_block("Program");

    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let mut lines = vec![
        detail_line("Address", program.address.clone()),
        detail_line("Balance", format_sol(program.lamports)),
        detail_line(
            "Loader",
            program.owner.clone().unwrap_or_else(|| "-".to_string()),
        ),
        detail_line(
            "Authority",
            program.authority.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    if let Some(slot) = program.program_data_slot {
        lines.push(detail_line("Deployed Slot", slot.to_string()));
    }
    if let Some(len) = program.program_data_len {
        lines.push(detail_line("Program Size", format!("{} bytes", len)));
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
// Helpers
// ============================================================================

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {} ──", title),
        Style::default().fg(MUTED_COLOR),
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountSummary;
    use crate::test_utils::JsonMother;
    use ratatui::{Terminal, backend::TestBackend};

    fn render_to_string<F: FnOnce(&mut Frame)>(width: u16, height: u16, f: F) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| f(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_vote_account_shows_failed_augmentation_notice() {
        let account = AccountSummary::from_json(&JsonMother::vote_account()).unwrap();
        let panel = (
            account.address.clone(),
            ValidatorPanel::Failed("timeout".to_string()),
        );

        let content = render_to_string(90, 30, |frame| {
            render_account_details(&account, Some(&panel), frame, frame.area());
        });

        // Base account data stays visible next to the notice
        assert!(content.contains("Failed to load validator details"));
        assert!(content.contains("Balance"));
        assert!(content.contains("identityNode"));
    }

    #[test]
    fn test_vote_account_shows_loading_state() {
        let account = AccountSummary::from_json(&JsonMother::vote_account()).unwrap();
        let panel = (account.address.clone(), ValidatorPanel::Loading);

        let content = render_to_string(90, 30, |frame| {
            render_account_details(&account, Some(&panel), frame, frame.area());
        });

        assert!(content.contains("Loading validator details"));
    }

    #[test]
    fn test_plain_account_renders_without_validator_sections() {
        let account = AccountSummary::from_json(&JsonMother::base_account()).unwrap();

        let content = render_to_string(90, 30, |frame| {
            render_account_details(&account, None, frame, frame.area());
        });

        assert!(content.contains("Account"));
        assert!(content.contains("Rent Epoch"));
        assert!(!content.contains("Validator"));
    }

    #[test]
    fn test_mint_account_shows_mint_section() {
        let account = AccountSummary::from_json(&JsonMother::mint_account()).unwrap();

        let content = render_to_string(90, 30, |frame| {
            render_account_details(&account, None, frame, frame.area());
        });

        assert!(content.contains("Mint Account"));
        assert!(content.contains("Supply"));
        assert!(content.contains("Decimals"));
    }

    #[test]
    fn test_token_details_render() {
        let token =
            crate::domain::TokenAccountInfo::from_json(&JsonMother::token_account()).unwrap();

        let content = render_to_string(90, 20, |frame| {
            render_token_details(&token, frame, frame.area());
        });

        assert!(content.contains("Token Account"));
        assert!(content.contains("Mint"));
        assert!(content.contains("initialized"));
    }

    #[test]
    fn test_program_details_render() {
        let program =
            crate::domain::ProgramAccountInfo::from_json(&JsonMother::program_account()).unwrap();

        let content = render_to_string(90, 20, |frame| {
            render_program_details(&program, frame, frame.area());
        });

        assert!(content.contains("Program"));
        assert!(content.contains("Authority"));
    }
}
