//! Transaction types for the Solana chain.
//!
//! This module defines the confirmed transaction shape produced by search
//! and by the recent-transactions feed, along with its status and
//! instruction summaries.

use ratatui::style::Color;
use serde_json::Value;

use super::account::{json_address, json_u64};
use super::error::SearchError;

// ============================================================================
// Helper Functions
// ============================================================================

/// Format a block time into a human-readable string.
///
/// `block_time` is a Unix timestamp in seconds; the chain reports `null`
/// for slots produced before timestamping was enabled.
#[must_use]
pub fn format_block_time(block_time: Option<i64>) -> String {
    let Some(secs) = block_time else {
        return "Timestamp not available".to_string();
    };

    let datetime = chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(chrono::Utc::now);
    datetime.format("%a, %d %b %Y %H:%M:%S").to_string()
}

// ============================================================================
// Transaction Status
// ============================================================================

/// Execution outcome of a confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TxnStatus {
    /// The transaction executed without error.
    #[default]
    Success,
    /// The transaction was included but its execution failed.
    Failed,
}

impl TxnStatus {
    /// Returns the human-readable name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }

    /// Returns the display color for this status.
    #[must_use]
    pub const fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Failed => Color::Red,
        }
    }
}

impl std::fmt::Display for TxnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Instruction Summary
// ============================================================================

/// A single instruction within a transaction message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstructionSummary {
    /// Address of the program the instruction invokes.
    pub program_id: String,
    /// Human-readable program name, when the endpoint resolves one.
    pub program_name: Option<String>,
    /// Number of accounts passed to the instruction.
    pub account_count: usize,
}

impl InstructionSummary {
    /// Parse an instruction from the transaction message.
    #[must_use]
    fn from_json(json: &Value) -> Option<Self> {
        let program_id = json_address(&json["programId"])
            .or_else(|| json_address(&json["program"]))?;

        let account_count = json["accounts"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default();

        Some(Self {
            program_id,
            program_name: json["programName"].as_str().map(String::from),
            account_count,
        })
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// A confirmed transaction.
///
/// The first signature identifies the transaction. `block_time` is kept as
/// an `Option` because the chain reports `null` for old slots; the field
/// being present at all is what identifies a transaction-shaped payload
/// during classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    /// Ordered transaction signatures; the first one is the id.
    pub signatures: Vec<String>,
    /// Unix timestamp of the containing block, when known.
    pub block_time: Option<i64>,
    /// Slot the transaction was confirmed in.
    pub slot: u64,
    /// Fee paid, in lamports.
    pub fee: u64,
    /// Execution outcome.
    pub status: TxnStatus,
    /// Error description for failed transactions.
    pub err: Option<String>,
    /// Account addresses referenced by the message.
    pub account_keys: Vec<String>,
    /// Instruction summaries in message order.
    pub instructions: Vec<InstructionSummary>,
}

impl Transaction {
    /// Parse a transaction from a GraphQL payload.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if the payload has no signatures.
    pub fn from_json(json: &Value) -> Result<Self, SearchError> {
        let signatures: Vec<String> = json["signatures"]
            .as_array()
            .map(|sigs| {
                sigs.iter()
                    .filter_map(|s| s.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        if signatures.is_empty() {
            return Err(SearchError::parse("transaction payload has no signatures"));
        }

        let meta = &json["meta"];
        let err = match &meta["err"] {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        let status = if err.is_some() {
            TxnStatus::Failed
        } else {
            TxnStatus::Success
        };

        let message = &json["message"];
        let account_keys = message["accountKeys"]
            .as_array()
            .map(|keys| keys.iter().filter_map(json_address).collect())
            .unwrap_or_default();
        let instructions = message["instructions"]
            .as_array()
            .map(|ixs| ixs.iter().filter_map(InstructionSummary::from_json).collect())
            .unwrap_or_default();

        Ok(Self {
            signatures,
            block_time: json["blockTime"].as_i64(),
            slot: json_u64(&json["slot"]).unwrap_or(0),
            fee: json_u64(&meta["fee"]).unwrap_or(0),
            status,
            err,
            account_keys,
            instructions,
        })
    }

    /// The transaction's identifying signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        self.signatures.first().map_or("", String::as_str)
    }

    /// The formatted block time.
    #[must_use]
    pub fn timestamp(&self) -> String {
        format_block_time(self.block_time)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_from_json_success() {
        let payload = json!({
            "signatures": ["5sigA", "5sigB"],
            "blockTime": 1_700_000_000,
            "slot": 250_123_456,
            "meta": { "err": null, "fee": 5000, "status": "confirmed" },
            "message": {
                "accountKeys": [
                    { "address": "payer1" },
                    "receiver1"
                ],
                "instructions": [
                    { "programId": "11111111111111111111111111111111", "accounts": ["a", "b"] }
                ]
            }
        });

        let txn = Transaction::from_json(&payload).unwrap();
        assert_eq!(txn.signature(), "5sigA");
        assert_eq!(txn.signatures.len(), 2);
        assert_eq!(txn.slot, 250_123_456);
        assert_eq!(txn.fee, 5000);
        assert_eq!(txn.status, TxnStatus::Success);
        assert!(txn.err.is_none());
        assert_eq!(txn.account_keys, vec!["payer1", "receiver1"]);
        assert_eq!(txn.instructions.len(), 1);
        assert_eq!(txn.instructions[0].account_count, 2);
    }

    #[test]
    fn test_transaction_failed_when_meta_err_present() {
        let payload = json!({
            "signatures": ["5sigC"],
            "blockTime": null,
            "slot": 1,
            "meta": { "err": { "InstructionError": [0, "Custom"] }, "fee": 5000 }
        });

        let txn = Transaction::from_json(&payload).unwrap();
        assert_eq!(txn.status, TxnStatus::Failed);
        assert!(txn.err.as_deref().unwrap().contains("InstructionError"));
        assert!(txn.block_time.is_none());
    }

    #[test]
    fn test_transaction_rejects_empty_signatures() {
        let payload = json!({ "signatures": [], "blockTime": 1, "slot": 2 });
        assert!(Transaction::from_json(&payload).is_err());

        let payload = json!({ "blockTime": 1, "slot": 2 });
        assert!(Transaction::from_json(&payload).is_err());
    }

    #[test]
    fn test_format_block_time() {
        assert_eq!(format_block_time(None), "Timestamp not available");
        let formatted = format_block_time(Some(1_700_000_000));
        assert!(formatted.contains("2023"));
    }

    #[test]
    fn test_txn_status_display() {
        assert_eq!(TxnStatus::Success.to_string(), "Success");
        assert_eq!(TxnStatus::Failed.to_string(), "Failed");
        assert_ne!(TxnStatus::Success.color(), TxnStatus::Failed.color());
    }
}
