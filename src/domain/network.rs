//! Cluster configuration for Solana networks.
//!
//! This module defines the supported clusters and their associated
//! configuration such as RPC and GraphQL API endpoints.

use serde::{Deserialize, Serialize};

// ============================================================================
// Cluster Configuration
// ============================================================================

/// Solana cluster variants.
///
/// Represents the different clusters that can be connected to, each with
/// its own set of API endpoints. User-defined clusters carry their
/// endpoints inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cluster {
    /// Mainnet Beta - the production cluster.
    #[default]
    MainnetBeta,
    /// Devnet - the development cluster with airdrops enabled.
    Devnet,
    /// Testnet - the staging cluster for release testing.
    Testnet,
    /// Localnet - a local test validator.
    Localnet,
    /// A user-defined cluster with custom endpoints.
    Custom {
        /// Display name for the cluster.
        name: String,
        /// JSON-RPC endpoint URL.
        rpc_url: String,
        /// GraphQL endpoint URL.
        graphql_url: String,
    },
}

impl Cluster {
    /// Returns the human-readable name of the cluster.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MainnetBeta => "Mainnet Beta",
            Self::Devnet => "Devnet",
            Self::Testnet => "Testnet",
            Self::Localnet => "Localnet",
            Self::Custom { name, .. } => name,
        }
    }

    /// Returns the JSON-RPC endpoint URL for this cluster.
    ///
    /// The RPC endpoint serves current cluster state: health, slot height,
    /// and recent blocks.
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        match self {
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://localhost:8899",
            Self::Custom { rpc_url, .. } => rpc_url,
        }
    }

    /// Returns the GraphQL endpoint URL for this cluster.
    ///
    /// The GraphQL endpoint serves account, token, and transaction lookups
    /// for search.
    #[must_use]
    pub fn graphql_url(&self) -> &str {
        match self {
            Self::MainnetBeta => "https://graphql.solscan.dev/mainnet",
            Self::Devnet => "https://graphql.solscan.dev/devnet",
            Self::Testnet => "https://graphql.solscan.dev/testnet",
            Self::Localnet => "http://localhost:8890/graphql",
            Self::Custom { graphql_url, .. } => graphql_url,
        }
    }

    /// Returns the query-string value identifying this cluster on the
    /// public web explorer, if one exists for it.
    #[must_use]
    pub fn web_explorer_param(&self) -> Option<&str> {
        match self {
            Self::MainnetBeta => Some(""),
            Self::Devnet => Some("?cluster=devnet"),
            Self::Testnet => Some("?cluster=testnet"),
            Self::Localnet | Self::Custom { .. } => None,
        }
    }

    /// Builds a public web explorer URL for an entity, if this cluster is
    /// reachable from the public explorer.
    ///
    /// `kind` is the explorer path segment: "address", "tx", or "block".
    #[must_use]
    pub fn web_explorer_url(&self, kind: &str, id: &str) -> Option<String> {
        self.web_explorer_param()
            .map(|param| format!("https://explorer.solana.com/{}/{}{}", kind, id, param))
    }

    /// Returns the built-in clusters in display order.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::MainnetBeta,
            Self::Devnet,
            Self::Testnet,
            Self::Localnet,
        ]
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
