//! HTTP clients for the cluster's APIs.
//!
//! This module provides typed clients for interacting with:
//! - The JSON-RPC endpoint - current cluster state and block data
//! - The GraphQL endpoint - search lookups and the transaction feed
//!
//! Clients are constructed at the composition root and injected into
//! their consumers; nothing here is a module-level singleton.

pub mod chain;
pub mod graphql;
pub mod http;

// ============================================================================
// Re-exports
// ============================================================================

pub use chain::ChainClient;
pub use graphql::{
    ACCOUNT_LOOKUP_QUERY, GraphQlClient, GraphQlError, GraphQlResponse, INVALID_SIGNATURE_CODE,
    PERFORMANCE_HISTORY_QUERY, QueryClient, RECENT_TRANSACTIONS_QUERY, TRANSACTION_LOOKUP_QUERY,
    VOTE_HISTORY_QUERY,
};
pub use http::{HttpConfig, build_http_client};
