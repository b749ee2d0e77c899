//! Shared test utilities and Mother pattern factories.
//!
//! This module provides reusable JSON payload fixtures for classifier,
//! dispatcher, and parsing tests. Use these helpers instead of rebuilding
//! payloads inline across tests.
#![allow(dead_code)]

use serde_json::{Value, json};

use crate::domain::{BlockInfo, Transaction, TxnStatus};

// ============================================================================
// JSON Payload Factories
// ============================================================================

/// Factory for the raw payload shapes the GraphQL endpoint returns.
pub struct JsonMother;

impl JsonMother {
    /// A successful transfer transaction.
    #[must_use]
    pub fn transaction() -> Value {
        json!({
            "signatures": ["5sigTransfer"],
            "blockTime": 1_700_000_000,
            "slot": 250_123_456,
            "meta": { "err": null, "fee": 5000, "status": "confirmed" },
            "message": {
                "accountKeys": [
                    { "address": "payerWallet1111111111111111111111111111111" },
                    { "address": "receiverWallet11111111111111111111111111111" },
                    { "address": "11111111111111111111111111111111" }
                ],
                "instructions": [
                    {
                        "programId": "11111111111111111111111111111111",
                        "programName": "System Program",
                        "accounts": ["payer", "receiver"]
                    }
                ]
            }
        })
    }

    /// A transaction from a slot that predates block timestamping; the
    /// blockTime key is present but null.
    #[must_use]
    pub fn transaction_without_block_time() -> Value {
        json!({
            "signatures": ["5sigOld"],
            "blockTime": null,
            "slot": 1234,
            "meta": { "err": null, "fee": 5000 }
        })
    }

    /// A transaction whose execution failed.
    #[must_use]
    pub fn failed_transaction() -> Value {
        json!({
            "signatures": ["5sigFailed"],
            "blockTime": 1_700_000_050,
            "slot": 250_123_500,
            "meta": {
                "err": { "InstructionError": [0, { "Custom": 6001 }] },
                "fee": 5000
            },
            "message": { "accountKeys": [], "instructions": [] }
        })
    }

    /// A plain wallet account.
    #[must_use]
    pub fn base_account() -> Value {
        json!({
            "address": "walletAddr111111111111111111111111111111111",
            "lamports": 1_500_000_000u64,
            "owner": { "address": "11111111111111111111111111111111" },
            "executable": false,
            "rentEpoch": 361,
            "space": 0
        })
    }

    /// An SPL token holding account.
    #[must_use]
    pub fn token_account() -> Value {
        json!({
            "address": "tokenAcc1111111111111111111111111111111111",
            "lamports": 2_039_280,
            "rentEpoch": 361,
            "mint": { "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "decimals": 6 },
            "owner": { "address": "walletAddr111111111111111111111111111111111" },
            "amount": "2500000",
            "state": "initialized"
        })
    }

    /// An executable program account.
    #[must_use]
    pub fn program_account() -> Value {
        json!({
            "address": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "lamports": 1,
            "executable": true,
            "rentEpoch": 361,
            "owner": { "address": "BPFLoaderUpgradeab1e11111111111111111111111" },
            "authority": { "address": "upgradeAuth11111111111111111111111111111111" },
            "programData": { "slot": 240_000_000, "data": "AAECAwQ=" }
        })
    }

    /// A validator vote account. Not executable; carries vote state.
    #[must_use]
    pub fn vote_account() -> Value {
        json!({
            "address": "voteAcc11111111111111111111111111111111111",
            "lamports": 27_074_400,
            "executable": false,
            "rentEpoch": 361,
            "owner": { "address": "Vote111111111111111111111111111111111111111" },
            "node": { "address": "identityNode1111111111111111111111111111111" },
            "commission": 7,
            "votes": [
                { "slot": 250_123_400, "confirmationCount": 31 },
                { "slot": 250_123_401, "confirmationCount": 30 }
            ],
            "epochCredits": [
                { "epoch": 500, "credits": 120_000, "previousCredits": 110_000 },
                { "epoch": 501, "credits": 131_000, "previousCredits": 120_000 }
            ],
            "rootSlot": 250_123_368
        })
    }

    /// An SPL token mint account. Classifies as a base account carrying
    /// mint metadata.
    #[must_use]
    pub fn mint_account() -> Value {
        json!({
            "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "lamports": 388_127_760,
            "executable": false,
            "rentEpoch": 361,
            "supply": "5034943926000000",
            "decimals": 6,
            "mintAuthority": { "address": "mintAuth1111111111111111111111111111111111" },
            "freezeAuthority": { "address": "freezeAuth111111111111111111111111111111111" }
        })
    }
}

// ============================================================================
// Domain Factories
// ============================================================================

/// Factory for typed domain values used by UI and state tests.
pub struct DomainMother;

impl DomainMother {
    #[must_use]
    pub fn block(slot: u64) -> BlockInfo {
        BlockInfo {
            slot,
            blockhash: format!("hash{slot}"),
            parent_slot: slot.saturating_sub(1),
            txn_count: 42,
            block_time: Some(1_700_000_000),
        }
    }

    #[must_use]
    pub fn transaction(signature: &str) -> Transaction {
        Transaction {
            signatures: vec![signature.to_string()],
            block_time: Some(1_700_000_000),
            slot: 250_123_456,
            fee: 5000,
            status: TxnStatus::Success,
            err: None,
            account_keys: vec![
                "payerWallet1111111111111111111111111111111".to_string(),
                "receiverWallet11111111111111111111111111111".to_string(),
            ],
            instructions: Vec::new(),
        }
    }

    #[must_use]
    pub fn failed_transaction(signature: &str) -> Transaction {
        Transaction {
            status: TxnStatus::Failed,
            err: Some("InstructionError".to_string()),
            ..Self::transaction(signature)
        }
    }
}
