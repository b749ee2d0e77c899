//! Block fetching methods for ChainClient.

use color_eyre::Result;
use serde_json::{Value, json};

use super::ChainClient;
use crate::domain::{BlockInfo, SearchError};

impl ChainClient {
    /// Fetch the latest confirmed blocks from the cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot height or slot list cannot be fetched;
    /// individual blocks that fail to load are skipped.
    pub async fn get_latest_blocks(&self, limit: usize) -> Result<Vec<BlockInfo>> {
        let slot = self
            .rpc_call("getSlot", json!([]))
            .await
            .map_err(SearchError::into_report)?
            .as_u64()
            .ok_or_else(|| SearchError::parse("getSlot returned a non-integer").into_report())?;

        if slot == 0 {
            return Ok(Vec::new());
        }

        let start = slot.saturating_sub(limit.saturating_sub(1) as u64);
        let slots_json = self
            .rpc_call("getBlocks", json!([start, slot]))
            .await
            .map_err(SearchError::into_report)?;

        let slots: Vec<u64> = slots_json
            .as_array()
            .map(|entries| entries.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default();

        let mut blocks = Vec::with_capacity(slots.len());
        for block_slot in slots.into_iter().rev().take(limit) {
            match self.get_block(block_slot).await {
                Ok(Some(block)) => blocks.push(block),
                Ok(None) => {}
                Err(e) => {
                    // A single missing block does not fail the feed
                    tracing::debug!("skipping block {block_slot}: {e}");
                }
            }
        }

        Ok(blocks)
    }

    /// Fetch a single block by slot, with transaction signatures only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a skipped slot yields
    /// `Ok(None)`.
    pub async fn get_block(&self, slot: u64) -> Result<Option<BlockInfo>> {
        let params = json!([
            slot,
            {
                "transactionDetails": "signatures",
                "rewards": false,
                "maxSupportedTransactionVersion": 0
            }
        ]);

        let result = match self.rpc_call("getBlock", params).await {
            Ok(value) => value,
            // Skipped slots come back as RPC errors; the feed treats them
            // as absent rather than failing
            Err(SearchError::Parse { .. }) => return Ok(None),
            Err(e) => return Err(e.into_report()),
        };

        if result.is_null() {
            return Ok(None);
        }

        BlockInfo::from_json(slot, &result)
            .map(Some)
            .map_err(SearchError::into_report)
    }
}
