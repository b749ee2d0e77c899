//! Application constants for the lazysol TUI.
//!
//! This module provides centralized constants for polling intervals, UI
//! dimensions, display symbols, and lamports math used throughout the
//! application.
#![allow(dead_code)]

use std::time::Duration;

// ============================================================================
// Timing Constants
// ============================================================================

/// Main loop tick rate.
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// How often the background loop fetches new blocks.
pub const BLOCK_FETCH_INTERVAL: Duration = Duration::from_secs(5);

/// How often the background loop fetches new transactions.
pub const TXN_FETCH_INTERVAL: Duration = Duration::from_secs(4);

/// How often the background loop re-checks cluster health.
pub const STATUS_CHECK_INTERVAL: Duration = Duration::from_secs(15);

// ============================================================================
// Capacity Constants
// ============================================================================

/// Maximum blocks kept in the dashboard list.
pub const MAX_BLOCKS_TO_KEEP: usize = 50;

/// Maximum transactions kept in the dashboard list.
pub const MAX_TXNS_TO_KEEP: usize = 100;

// ============================================================================
// UI Dimension Constants
// ============================================================================

/// Height of each block item in the blocks list (in rows).
pub const BLOCK_ITEM_HEIGHT: u16 = 3;

/// Height of each transaction item in the transactions list (in rows).
pub const TXN_ITEM_HEIGHT: u16 = 4;

/// Height of the application header area (in rows).
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the section title area (in rows).
pub const TITLE_HEIGHT: u16 = 3;

/// Height of the footer area (in rows).
pub const FOOTER_HEIGHT: u16 = 1;

// ============================================================================
// Display Symbols
// ============================================================================

/// Unicode symbol for SOL currency display.
pub const SOL_SYMBOL: &str = "◎";

// ============================================================================
// Numeric Constants
// ============================================================================

/// Number of lamports per SOL.
///
/// The chain denominates balances and fees in lamports, where
/// 1 SOL = 1,000,000,000 lamports.
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Number of lamports per SOL as an integer.
pub const LAMPORTS_PER_SOL_U64: u64 = 1_000_000_000;

// ============================================================================
// Formatting Constants
// ============================================================================

/// Default truncated id length for compact displays.
pub const DEFAULT_TRUNCATED_ID_LENGTH: usize = 16;

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts lamports to SOL.
#[must_use]
pub const fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Formats a lamport amount as a human-readable SOL string.
///
/// # Example
///
/// ```rust
/// use lazysol::constants::format_sol;
///
/// let formatted = format_sol(1_500_000_000);
/// assert_eq!(formatted, "1.500000000 SOL");
/// ```
#[must_use]
pub fn format_sol(lamports: u64) -> String {
    let sol = lamports_to_sol(lamports);
    format!("{sol:.9} SOL")
}

/// Formats a lamport amount with the SOL symbol.
#[must_use]
pub fn format_sol_with_symbol(lamports: u64) -> String {
    let sol = lamports_to_sol(lamports);
    format!("{SOL_SYMBOL} {sol:.9}")
}

/// Truncates an address or signature for compact display, keeping the
/// leading characters and appending an ellipsis.
#[must_use]
pub fn truncate_id(id: &str, max_chars: usize) -> String {
    if id.chars().count() <= max_chars {
        return id.to_string();
    }
    let prefix: String = id.chars().take(max_chars).collect();
    format!("{prefix}…")
}

// ============================================================================
// Tests
// ============================================================================
