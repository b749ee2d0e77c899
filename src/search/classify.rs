//! Structural classification of raw search payloads.
//!
//! The GraphQL schema returns polymorphic account and transaction shapes
//! without a discriminant the UI can trust, so the concrete kind of each
//! payload is inferred from field presence. The predicates overlap (every
//! token account also satisfies the base-account check), which is why
//! classification runs them in a fixed priority order and takes the first
//! match:
//!
//! 1. transaction
//! 2. token account
//! 3. program account (executable)
//! 4. base account (fallback)
//!
//! Any `type` or `__typename` tag already present in a payload is ignored;
//! upstream tagging is not trusted.

use serde_json::Value;

use crate::domain::{
    AccountSummary, ProgramAccountInfo, SearchError, SearchResult, TokenAccountInfo, Transaction,
};

// ============================================================================
// Result Kind
// ============================================================================

/// The closed set of classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// A confirmed transaction.
    Transaction,
    /// A base account (including vote accounts).
    Address,
    /// An SPL token holding account.
    Token,
    /// An executable program account.
    Program,
}

impl ResultKind {
    /// Returns the display string for this kind.
    #[must_use]
    #[allow(dead_code)] // Public API
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Address => "address",
            Self::Token => "token",
            Self::Program => "program",
        }
    }
}

// ============================================================================
// Structural Predicates
// ============================================================================

/// A payload is transaction-shaped iff it carries a non-empty `signatures`
/// sequence and a `blockTime` key. `blockTime` may be JSON null (old slots
/// predate timestamping) but the key must exist.
#[must_use]
pub fn is_transaction(payload: &Value) -> bool {
    let has_signatures = payload["signatures"]
        .as_array()
        .is_some_and(|sigs| !sigs.is_empty());
    let has_block_time = payload
        .as_object()
        .is_some_and(|obj| obj.contains_key("blockTime"));

    has_signatures && has_block_time
}

/// A payload is token-account-shaped iff it carries both `mint` and
/// `owner`.
#[must_use]
pub fn is_token_account(payload: &Value) -> bool {
    let obj = match payload.as_object() {
        Some(obj) => obj,
        None => return false,
    };
    obj.contains_key("mint") && obj.contains_key("owner")
}

/// A payload is program-account-shaped iff `executable` is `true`.
///
/// Vote accounts are not executable, so they fall through to the base
/// account predicate; only the programs themselves land here.
#[must_use]
pub fn is_program_account(payload: &Value) -> bool {
    payload["executable"].as_bool() == Some(true)
}

/// A payload is base-account-shaped iff it carries both `address` and
/// `lamports`. This is the fallback for anything the earlier predicates
/// did not claim.
#[must_use]
pub fn is_base_account(payload: &Value) -> bool {
    let obj = match payload.as_object() {
        Some(obj) => obj,
        None => return false,
    };
    obj.contains_key("address") && obj.contains_key("lamports")
}

// ============================================================================
// Classification
// ============================================================================

/// Assign a classification tag to a payload, or `None` if no predicate
/// matches.
///
/// Pure function of the payload's shape: evaluating it twice on the same
/// payload yields the same tag.
#[must_use]
pub fn classify(payload: &Value) -> Option<ResultKind> {
    if is_transaction(payload) {
        Some(ResultKind::Transaction)
    } else if is_token_account(payload) {
        Some(ResultKind::Token)
    } else if is_program_account(payload) {
        Some(ResultKind::Program)
    } else if is_base_account(payload) {
        Some(ResultKind::Address)
    } else {
        None
    }
}

/// Classify a payload and parse it into its typed result.
///
/// Returns `Ok(None)` for unrecognized shapes, which are logged and
/// dropped so one malformed item never fails a whole batch.
///
/// # Errors
///
/// Returns `SearchError::Parse` when a payload matches a predicate but its
/// required fields fail to parse.
pub fn classify_payload(payload: &Value) -> Result<Option<SearchResult>, SearchError> {
    let Some(kind) = classify(payload) else {
        tracing::warn!("dropping search payload with unrecognized shape");
        return Ok(None);
    };

    let result = match kind {
        ResultKind::Transaction => {
            SearchResult::Transaction(Box::new(Transaction::from_json(payload)?))
        }
        ResultKind::Token => SearchResult::Token(TokenAccountInfo::from_json(payload)?),
        ResultKind::Program => SearchResult::Program(ProgramAccountInfo::from_json(payload)?),
        ResultKind::Address => SearchResult::Account(AccountSummary::from_json(payload)?),
    };

    Ok(Some(result))
}

// ============================================================================
// Tests
// ============================================================================
