//! Account types for the Solana chain.
//!
//! This module defines the account shapes the search pipeline produces:
//! the minimal base account, token accounts, and program accounts. Each
//! type parses itself from the loosely-typed JSON payloads returned by the
//! GraphQL endpoint.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use super::error::SearchError;
use super::validator::VoteState;

// ============================================================================
// JSON Helpers
// ============================================================================

/// Read a chain-native integer from a JSON value.
///
/// Chain integers (lamports, slots, rent epochs, fees) are 64-bit and may
/// arrive either as JSON numbers or as decimal strings, depending on the
/// endpoint's number handling. Both encodings are accepted; anything else
/// yields `None`.
#[must_use]
pub(crate) fn json_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    }
}

/// Read an address from either a plain string or a `{ address }` object.
///
/// The GraphQL schema nests related accounts as objects with an `address`
/// field, while top-level keys are plain strings.
#[must_use]
pub(crate) fn json_address(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => value["address"].as_str().map(String::from),
        _ => None,
    }
}

// ============================================================================
// Base Account
// ============================================================================

/// The minimal account shape: address, balance, and rent metadata.
///
/// This is the fallback classification for any account-like payload that
/// is neither a token account nor an executable program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountSummary {
    /// The base58 account address (32-44 characters).
    pub address: String,
    /// Account balance in lamports.
    pub lamports: u64,
    /// Owning program address, if reported.
    pub owner: Option<String>,
    /// Whether the account holds an executable program.
    pub executable: bool,
    /// The epoch at which rent was last collected.
    pub rent_epoch: u64,
    /// Size of the account data in bytes, if reported.
    pub space: Option<u64>,
    /// Mint metadata when this account is an SPL token mint.
    pub mint_details: Option<MintDetails>,
    /// Vote state when this account is a validator vote account.
    pub vote_state: Option<VoteState>,
}

impl AccountSummary {
    /// Parse a base account from a GraphQL payload.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if the payload is missing `address` or
    /// `lamports`.
    pub fn from_json(json: &Value) -> Result<Self, SearchError> {
        let address = json["address"]
            .as_str()
            .ok_or_else(|| SearchError::parse("account payload missing 'address'"))?
            .to_string();
        let lamports = json_u64(&json["lamports"])
            .ok_or_else(|| SearchError::parse("account payload missing 'lamports'"))?;

        Ok(Self {
            address,
            lamports,
            owner: json_address(&json["owner"]),
            executable: json["executable"].as_bool().unwrap_or(false),
            rent_epoch: json_u64(&json["rentEpoch"]).unwrap_or(0),
            space: json_u64(&json["space"]),
            mint_details: MintDetails::from_json(json),
            vote_state: VoteState::from_json(json),
        })
    }

    /// Whether this account is a validator vote account.
    #[must_use]
    pub fn is_vote_account(&self) -> bool {
        self.vote_state.is_some()
    }

    /// Returns the balance in SOL.
    #[must_use]
    #[allow(dead_code)] // Part of AccountSummary public API
    pub fn balance_in_sol(&self) -> f64 {
        self.lamports as f64 / 1_000_000_000.0
    }
}

// ============================================================================
// Mint Details
// ============================================================================

/// SPL token mint metadata carried by mint accounts.
///
/// Mints classify as base accounts; this struct is parsed opportunistically
/// so the detail view can show supply and authority data when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintDetails {
    /// Authority allowed to mint new tokens, if any.
    pub mint_authority: Option<String>,
    /// Total supply in base units, as reported by the chain.
    pub supply: String,
    /// Number of decimals in the token's base unit.
    pub decimals: u8,
    /// Authority allowed to freeze token accounts, if any.
    pub freeze_authority: Option<String>,
}

impl MintDetails {
    /// Parse mint metadata from an account payload, if the mint fields are
    /// present. Supply and decimals together identify a mint; anything
    /// less is not one.
    #[must_use]
    pub fn from_json(json: &Value) -> Option<Self> {
        let supply = json["supply"].as_str().map(String::from).or_else(|| {
            json_u64(&json["supply"]).map(|n| n.to_string())
        })?;
        let decimals = json["decimals"].as_u64()?;

        Some(Self {
            mint_authority: json_address(&json["mintAuthority"]),
            supply,
            decimals: decimals as u8,
            freeze_authority: json_address(&json["freezeAuthority"]),
        })
    }
}

// ============================================================================
// Token Account
// ============================================================================

/// A compact description of the mint a token account belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MintSummary {
    /// The mint's address.
    pub address: String,
    /// Number of decimals, if reported alongside the token account.
    pub decimals: Option<u8>,
}

/// An SPL token holding account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenAccountInfo {
    /// The token account's address.
    pub address: String,
    /// Account balance in lamports (rent deposit, not token value).
    pub lamports: u64,
    /// The mint this account holds.
    pub mint: MintSummary,
    /// The wallet that owns this token account.
    pub owner: String,
    /// Token amount in base units, as reported by the chain.
    pub amount: String,
    /// Account state, e.g. "initialized" or "frozen".
    pub state: String,
    /// The epoch at which rent was last collected.
    pub rent_epoch: u64,
}

impl TokenAccountInfo {
    /// Parse a token account from a GraphQL payload.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if `address`, `mint`, or `owner` are
    /// missing.
    pub fn from_json(json: &Value) -> Result<Self, SearchError> {
        let address = json["address"]
            .as_str()
            .ok_or_else(|| SearchError::parse("token account payload missing 'address'"))?
            .to_string();
        let mint_address = json_address(&json["mint"])
            .ok_or_else(|| SearchError::parse("token account payload missing 'mint'"))?;
        let owner = json_address(&json["owner"])
            .ok_or_else(|| SearchError::parse("token account payload missing 'owner'"))?;

        let decimals = json["mint"]["decimals"].as_u64().map(|d| d as u8);

        Ok(Self {
            address,
            lamports: json_u64(&json["lamports"]).unwrap_or(0),
            mint: MintSummary {
                address: mint_address,
                decimals,
            },
            owner,
            amount: json["amount"]
                .as_str()
                .map(String::from)
                .or_else(|| json_u64(&json["amount"]).map(|n| n.to_string()))
                .unwrap_or_else(|| "0".to_string()),
            state: json["state"].as_str().unwrap_or("initialized").to_string(),
            rent_epoch: json_u64(&json["rentEpoch"]).unwrap_or(0),
        })
    }

    /// Token amount scaled by the mint's decimals, when known.
    #[must_use]
    pub fn ui_amount(&self) -> Option<f64> {
        let raw = self.amount.parse::<u64>().ok()?;
        let decimals = self.mint.decimals?;
        Some(raw as f64 / 10f64.powi(i32::from(decimals)))
    }
}

// ============================================================================
// Program Account
// ============================================================================

/// An executable program account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramAccountInfo {
    /// The program's address.
    pub address: String,
    /// Account balance in lamports.
    pub lamports: u64,
    /// Owning loader address, if reported.
    pub owner: Option<String>,
    /// Upgrade authority, if the program is upgradeable.
    pub authority: Option<String>,
    /// Slot at which the program data was last deployed.
    pub program_data_slot: Option<u64>,
    /// Size of the program data in bytes, if reported.
    pub program_data_len: Option<u64>,
    /// The epoch at which rent was last collected.
    pub rent_epoch: u64,
}

impl ProgramAccountInfo {
    /// Parse a program account from a GraphQL payload.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if `address` is missing.
    pub fn from_json(json: &Value) -> Result<Self, SearchError> {
        let address = json["address"]
            .as_str()
            .ok_or_else(|| SearchError::parse("program account payload missing 'address'"))?
            .to_string();

        let program_data = &json["programData"];
        // The data field is either a byte count or a base64 blob
        let program_data_len = json_u64(&program_data["data"]).or_else(|| {
            program_data["data"].as_str().map(|d| {
                BASE64
                    .decode(d)
                    .map(|bytes| bytes.len() as u64)
                    .unwrap_or(d.len() as u64)
            })
        });

        Ok(Self {
            address,
            lamports: json_u64(&json["lamports"]).unwrap_or(0),
            owner: json_address(&json["owner"]),
            authority: json_address(&json["authority"]),
            program_data_slot: json_u64(&program_data["slot"]),
            program_data_len,
            rent_epoch: json_u64(&json["rentEpoch"]).unwrap_or(0),
        })
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
    fn test_json_u64_accepts_numbers_and_strings() {
        assert_eq!(json_u64(&json!(42)), Some(42));
        assert_eq!(json_u64(&json!("18446744073709551615")), Some(u64::MAX));
        assert_eq!(json_u64(&json!(null)), None);
        assert_eq!(json_u64(&json!("not a number")), None);
        assert_eq!(json_u64(&json!(-1)), None);
    }

    #[test]
    fn test_json_address_accepts_string_and_object() {
        assert_eq!(json_address(&json!("addr1")), Some("addr1".to_string()));
        assert_eq!(
            json_address(&json!({ "address": "addr2" })),
            Some("addr2".to_string())
        );
        assert_eq!(json_address(&json!(null)), None);
    }

    #[test]
    fn test_account_summary_from_json() {
        let payload = json!({
            "address": "Vote111111111111111111111111111111111111111",
            "lamports": "27074400",
            "owner": { "address": "11111111111111111111111111111111" },
            "executable": false,
            "rentEpoch": 361,
            "space": 128
        });

        let account = AccountSummary::from_json(&payload).unwrap();
        assert_eq!(account.address, "Vote111111111111111111111111111111111111111");
        assert_eq!(account.lamports, 27_074_400);
        assert_eq!(
            account.owner.as_deref(),
            Some("11111111111111111111111111111111")
        );
        assert!(!account.executable);
        assert_eq!(account.rent_epoch, 361);
        assert_eq!(account.space, Some(128));
        assert!(account.mint_details.is_none());
        assert!(!account.is_vote_account());
    }

    #[test]
    fn test_vote_state_parsed_when_present() {
        let payload = json!({
            "address": "voteAcc1",
            "lamports": 27_074_400,
            "node": { "address": "identity1" },
            "commission": 5,
            "votes": [{ "slot": 100, "confirmationCount": 31 }]
        });

        let account = AccountSummary::from_json(&payload).unwrap();
        assert!(account.is_vote_account());
        let vote_state = account.vote_state.unwrap();
        assert_eq!(vote_state.node, "identity1");
        assert_eq!(vote_state.commission, 5);
    }

    #[test]
    fn test_account_summary_rejects_missing_lamports() {
        let payload = json!({ "address": "abc" });
        assert!(AccountSummary::from_json(&payload).is_err());
    }

    #[test]
    fn test_mint_details_parsed_when_present() {
        let payload = json!({
            "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "lamports": 1_000_000,
            "supply": "5034943926000000",
            "decimals": 6,
            "mintAuthority": { "address": "auth1" },
            "freezeAuthority": null
        });

        let account = AccountSummary::from_json(&payload).unwrap();
        let mint = account.mint_details.expect("mint fields present");
        assert_eq!(mint.supply, "5034943926000000");
        assert_eq!(mint.decimals, 6);
        assert_eq!(mint.mint_authority.as_deref(), Some("auth1"));
        assert!(mint.freeze_authority.is_none());
    }

    #[test]
    fn test_token_account_from_json() {
        let payload = json!({
            "address": "tokenAcc1",
            "lamports": 2_039_280,
            "mint": { "address": "mint1", "decimals": 9 },
            "owner": { "address": "wallet1" },
            "amount": "2500000000",
            "state": "initialized"
        });

        let token = TokenAccountInfo::from_json(&payload).unwrap();
        assert_eq!(token.mint.address, "mint1");
        assert_eq!(token.owner, "wallet1");
        assert_eq!(token.amount, "2500000000");
        assert_eq!(token.ui_amount(), Some(2.5));
    }

    #[test]
    fn test_token_account_requires_mint_and_owner() {
        let payload = json!({ "address": "acc", "owner": "wallet1" });
        assert!(TokenAccountInfo::from_json(&payload).is_err());

        let payload = json!({ "address": "acc", "mint": "mint1" });
        assert!(TokenAccountInfo::from_json(&payload).is_err());
    }

    #[test]
    fn test_program_account_from_json() {
        let payload = json!({
            "address": "prog1",
            "lamports": 1,
            "executable": true,
            "authority": { "address": "upgrade1" },
            "programData": { "slot": 250_000_000, "data": "AAECAwQ=" }
        });

        let program = ProgramAccountInfo::from_json(&payload).unwrap();
        assert_eq!(program.address, "prog1");
        assert_eq!(program.authority.as_deref(), Some("upgrade1"));
        assert_eq!(program.program_data_slot, Some(250_000_000));
        // "AAECAwQ=" decodes to five bytes
        assert_eq!(program.program_data_len, Some(5));
    }

    #[test]
    fn test_balance_in_sol() {
        let account = AccountSummary {
            lamports: 1_500_000_000,
            ..Default::default()
        };
        assert_eq!(account.balance_in_sol(), 1.5);
    }
}
