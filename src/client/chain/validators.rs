//! Validator augmentation queries for ChainClient.
//!
//! These run after a search result has been classified as a vote account,
//! and only for the detail view. Their failure degrades to the base
//! account data; it never invalidates the primary result.

use serde_json::{Value, json};

use super::ChainClient;
use crate::client::graphql::{PERFORMANCE_HISTORY_QUERY, QueryClient, VOTE_HISTORY_QUERY};
use crate::domain::{PerformanceSample, SearchError, ValidatorDetails, VoteLot};

/// How many historical votes to request.
const VOTE_HISTORY_LIMIT: usize = 32;

/// How many performance epochs to request.
const PERFORMANCE_HISTORY_LIMIT: usize = 10;

impl ChainClient {
    /// Fetch vote and performance history for a vote account.
    ///
    /// The two queries are independent; both must succeed for the
    /// augmentation to be considered loaded, since the detail view renders
    /// them together.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Augmentation` on any failure, which callers
    /// surface as a notice without touching the classified account data.
    pub async fn get_validator_details(
        &self,
        address: &str,
    ) -> Result<ValidatorDetails, SearchError> {
        let vote_history = self.fetch_vote_history(address).await?;
        let performance = self.fetch_performance_history(address).await?;

        Ok(ValidatorDetails {
            vote_history,
            performance,
        })
    }

    async fn fetch_vote_history(&self, address: &str) -> Result<Vec<VoteLot>, SearchError> {
        let variables = json!({ "address": address, "limit": VOTE_HISTORY_LIMIT });
        let response = self
            .graphql()
            .query(VOTE_HISTORY_QUERY, variables)
            .await
            .map_err(|e| SearchError::augmentation(format!("vote history: {e}")))?;

        let data = response
            .data
            .ok_or_else(|| SearchError::augmentation("vote history: empty response"))?;

        Ok(parse_vote_history(&data["voteHistory"]))
    }

    async fn fetch_performance_history(
        &self,
        address: &str,
    ) -> Result<Vec<PerformanceSample>, SearchError> {
        let variables = json!({ "address": address, "limit": PERFORMANCE_HISTORY_LIMIT });
        let response = self
            .graphql()
            .query(PERFORMANCE_HISTORY_QUERY, variables)
            .await
            .map_err(|e| SearchError::augmentation(format!("performance history: {e}")))?;

        let data = response
            .data
            .ok_or_else(|| SearchError::augmentation("performance history: empty response"))?;

        Ok(parse_performance_history(&data["performanceHistory"]))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse the vote-history array, skipping malformed entries.
pub(crate) fn parse_vote_history(json: &Value) -> Vec<VoteLot> {
    json.as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    Some(VoteLot {
                        slot: entry["slot"].as_u64()?,
                        confirmation_count: entry["confirmationCount"].as_u64().unwrap_or(0),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse the performance-history array, skipping malformed entries.
pub(crate) fn parse_performance_history(json: &Value) -> Vec<PerformanceSample> {
    json.as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    Some(PerformanceSample {
                        epoch: entry["epoch"].as_u64()?,
                        leader_slots: entry["leaderSlots"].as_u64().unwrap_or(0),
                        blocks_produced: entry["blocksProduced"].as_u64().unwrap_or(0),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
