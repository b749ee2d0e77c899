//! Chain API client.
//!
//! This module provides the unified `ChainClient` for talking to a
//! cluster's two endpoints:
//! - JSON-RPC - current cluster state (health, slot height, blocks)
//! - GraphQL - the query surface used by search and the transaction feed
//!
//! # Example
//!
//! ```ignore
//! use crate::client::ChainClient;
//! use crate::domain::Cluster;
//!
//! let client = ChainClient::new(&Cluster::MainnetBeta)?;
//! let blocks = client.get_latest_blocks(5).await?;
//! ```

use serde_json::{Value, json};
use std::time::Duration;

use crate::client::graphql::GraphQlClient;
use crate::client::http::{HEALTH_CHECK_TIMEOUT_SECS, HttpConfig, build_http_client};
use crate::domain::{Cluster, ClusterStatus, SearchError};

mod blocks;
mod transactions;
mod validators;

#[cfg(test)]
mod tests;

// ============================================================================
// Chain API Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct ChainClient {
    /// The JSON-RPC endpoint URL.
    pub(crate) rpc_url: String,
    /// HTTP client for RPC requests.
    pub(crate) client: reqwest::Client,
    /// GraphQL client for lookups and feeds.
    graphql: GraphQlClient,
}

impl ChainClient {
    /// Creates a new client for a cluster.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if the HTTP client fails to initialize
    /// (e.g., TLS backend unavailable).
    pub fn new(cluster: &Cluster) -> Result<Self, SearchError> {
        let client = build_http_client(&HttpConfig::default())?;
        let graphql = GraphQlClient::with_client(cluster.graphql_url(), client.clone());

        Ok(Self {
            rpc_url: cluster.rpc_url().to_string(),
            client,
            graphql,
        })
    }

    #[must_use]
    #[allow(dead_code)] // Public API
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// The GraphQL client sharing this client's connection pool.
    #[must_use]
    pub fn graphql(&self) -> &GraphQlClient {
        &self.graphql
    }

    /// Issue one JSON-RPC call and unwrap its `result` field.
    pub(crate) async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, SearchError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(SearchError::Network)?;

        let payload: Value = response.json().await.map_err(SearchError::Network)?;

        if let Some(error) = payload.get("error")
            && !error.is_null()
        {
            let message = error["message"].as_str().unwrap_or("unknown RPC error");
            return Err(SearchError::parse(format!("{method}: {message}")));
        }

        payload
            .get("result")
            .cloned()
            .ok_or_else(|| SearchError::parse(format!("{method}: response missing 'result'")))
    }

    /// Check the health of the cluster's RPC endpoint and read the current
    /// slot height.
    ///
    /// # Errors
    ///
    /// Returns a display-ready error string if the endpoint is unreachable
    /// or unhealthy.
    pub async fn get_cluster_status(&self) -> Result<ClusterStatus, String> {
        let health = self
            .client
            .post(&self.rpc_url)
            .header("accept", "application/json")
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .json(&json!({ "jsonrpc": "2.0", "id": 1, "method": "getHealth" }))
            .send()
            .await;

        if let Err(e) = health {
            return Err(format!(
                "Unable to connect to RPC at {}. Error: {}",
                self.rpc_url, e
            ));
        }

        let slot = self
            .rpc_call("getSlot", json!([]))
            .await
            .ok()
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        Ok(ClusterStatus { slot })
    }
}
