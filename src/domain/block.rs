//! Block types for the dashboard feed.

use serde_json::Value;

use super::account::json_u64;
use super::error::SearchError;
use super::transaction::format_block_time;

// ============================================================================
// Block Info
// ============================================================================

/// A confirmed block as shown in the dashboard list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockInfo {
    /// Slot number of the block.
    pub slot: u64,
    /// The block's hash.
    pub blockhash: String,
    /// Slot of the parent block.
    pub parent_slot: u64,
    /// Number of transactions in the block.
    pub txn_count: u64,
    /// Unix timestamp of block production, when known.
    pub block_time: Option<i64>,
}

impl BlockInfo {
    /// Parse a block from an RPC `getBlock` response.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if the payload is missing `blockhash`.
    pub fn from_json(slot: u64, json: &Value) -> Result<Self, SearchError> {
        let blockhash = json["blockhash"]
            .as_str()
            .ok_or_else(|| SearchError::parse("block payload missing 'blockhash'"))?
            .to_string();

        let txn_count = json["signatures"]
            .as_array()
            .or_else(|| json["transactions"].as_array())
            .map(|txns| txns.len() as u64)
            .unwrap_or(0);

        Ok(Self {
            slot,
            blockhash,
            parent_slot: json_u64(&json["parentSlot"]).unwrap_or(0),
            txn_count,
            block_time: json["blockTime"].as_i64(),
        })
    }

    /// The formatted production time.
    #[must_use]
    pub fn timestamp(&self) -> String {
        format_block_time(self.block_time)
    }
}

// ============================================================================
// Cluster Status
// ============================================================================

/// Current cluster status reported by the RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterStatus {
    /// The current slot height.
    pub slot: u64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_from_json() {
        let payload = json!({
            "blockhash": "9vmP6ZF5kt6rQ3X1kZ1rP9Vb",
            "parentSlot": 250_000_000,
            "blockTime": 1_700_000_100,
            "signatures": ["s1", "s2", "s3"]
        });

        let block = BlockInfo::from_json(250_000_001, &payload).unwrap();
        assert_eq!(block.slot, 250_000_001);
        assert_eq!(block.parent_slot, 250_000_000);
        assert_eq!(block.txn_count, 3);
        assert_eq!(block.block_time, Some(1_700_000_100));
    }

    #[test]
    fn test_block_counts_full_transactions() {
        let payload = json!({
            "blockhash": "hash1",
            "parentSlot": 1,
            "transactions": [{}, {}]
        });

        let block = BlockInfo::from_json(2, &payload).unwrap();
        assert_eq!(block.txn_count, 2);
    }

    #[test]
    fn test_block_rejects_missing_blockhash() {
        let payload = json!({ "parentSlot": 1 });
        assert!(BlockInfo::from_json(2, &payload).is_err());
    }
}
