//! Transaction feed methods for ChainClient.

use color_eyre::Result;
use serde_json::{Value, json};

use super::ChainClient;
use crate::client::graphql::{QueryClient, RECENT_TRANSACTIONS_QUERY};
use crate::domain::{SearchError, Transaction};

impl ChainClient {
    /// Fetch the latest confirmed transactions from the cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; malformed entries in the
    /// response are skipped.
    pub async fn get_latest_transactions(&self, limit: usize) -> Result<Vec<Transaction>> {
        let variables = json!({ "limit": limit });
        let response = self
            .graphql()
            .query(RECENT_TRANSACTIONS_QUERY, variables)
            .await
            .map_err(SearchError::into_report)?;

        let data = match response.data {
            Some(data) => data,
            None => {
                let message = response
                    .first_error_message()
                    .unwrap_or("empty response")
                    .to_string();
                return Err(SearchError::parse(message).into_report());
            }
        };

        Ok(parse_transactions_array(&data["recentTransactions"]))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse an array of transactions from a response value.
///
/// Malformed entries are skipped so one bad transaction never empties the
/// feed.
pub(crate) fn parse_transactions_array(json: &Value) -> Vec<Transaction> {
    let empty_vec = Vec::new();
    let entries = json.as_array().unwrap_or(&empty_vec);
    let mut transactions = Vec::with_capacity(entries.len());

    for entry in entries {
        match Transaction::from_json(entry) {
            Ok(txn) => transactions.push(txn),
            Err(e) => {
                tracing::debug!("skipping malformed transaction in feed: {e}");
            }
        }
    }

    transactions
}
