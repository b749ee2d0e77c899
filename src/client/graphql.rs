//! GraphQL query collaborator.
//!
//! The search pipeline talks to the chain's GraphQL endpoint through the
//! [`QueryClient`] trait: one `query(document, variables)` operation that
//! yields either data or a list of errors. The concrete implementation is
//! [`GraphQlClient`]; tests substitute a mock. The client instance is
//! constructed at the composition root and injected into the dispatcher,
//! so there is no module-level singleton to hide state in.

use serde_json::{Value, json};

use super::http::{HttpConfig, build_http_client};
use crate::domain::SearchError;

// ============================================================================
// Query Documents
// ============================================================================

/// Account lookup by address. Returns the account itself plus token
/// accounts and programs related to the address.
pub const ACCOUNT_LOOKUP_QUERY: &str = r#"
query AccountLookup($address: String!) {
  account(address: $address) {
    address
    lamports
    executable
    rentEpoch
    space
    owner { address }
    mint { address decimals }
    amount
    state
    authority { address }
    programData { slot data }
    supply
    decimals
    mintAuthority { address }
    freezeAuthority { address }
    node { address }
    commission
    votes { slot confirmationCount }
    epochCredits { epoch credits previousCredits }
    rootSlot
  }
  tokens(ownerOrMint: $address) {
    address
    lamports
    rentEpoch
    mint { address decimals }
    owner { address }
    amount
    state
  }
  contracts(authority: $address) {
    address
    lamports
    rentEpoch
    executable
    owner { address }
    authority { address }
    programData { slot data }
  }
}"#;

/// Transaction lookup by signature.
pub const TRANSACTION_LOOKUP_QUERY: &str = r#"
query TransactionLookup($signature: String!, $since: Int) {
  transaction(signature: $signature, since: $since) {
    signatures
    blockTime
    slot
    meta { err fee status }
    message {
      accountKeys { address }
      instructions { programId programName accounts }
    }
  }
}"#;

/// Recent confirmed transactions for the dashboard feed.
pub const RECENT_TRANSACTIONS_QUERY: &str = r#"
query RecentTransactions($limit: Int!) {
  recentTransactions(limit: $limit) {
    signatures
    blockTime
    slot
    meta { err fee status }
    message {
      accountKeys { address }
      instructions { programId programName accounts }
    }
  }
}"#;

/// Vote history for a validator vote account.
pub const VOTE_HISTORY_QUERY: &str = r#"
query VoteHistory($address: String!, $limit: Int!) {
  voteHistory(address: $address, limit: $limit) {
    slot
    confirmationCount
  }
}"#;

/// Per-epoch block production history for a validator.
pub const PERFORMANCE_HISTORY_QUERY: &str = r#"
query PerformanceHistory($address: String!, $limit: Int!) {
  performanceHistory(address: $address, limit: $limit) {
    epoch
    leaderSlots
    blocksProduced
  }
}"#;

/// Error code the endpoint uses for malformed signatures.
pub const INVALID_SIGNATURE_CODE: &str = "INVALID_SIGNATURE";

// ============================================================================
// Response Envelope
// ============================================================================

/// One error entry in a GraphQL response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphQlError {
    /// Human-oriented error message.
    pub message: String,
    /// Machine-readable error code from `extensions.code`, when present.
    pub code: Option<String>,
}

/// A GraphQL response: data, errors, or both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphQlResponse {
    /// The `data` object, absent on total failure.
    pub data: Option<Value>,
    /// Error entries, empty on success.
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Build a successful response around a data object.
    #[must_use]
    #[allow(dead_code)] // Used by tests building canned responses
    pub fn of_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Parse the response envelope from the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` if the body is neither a data nor an
    /// errors envelope.
    pub fn from_body(body: Value) -> Result<Self, SearchError> {
        let data = match &body["data"] {
            Value::Null => None,
            value => Some(value.clone()),
        };

        let errors = body["errors"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| GraphQlError {
                        message: entry["message"].as_str().unwrap_or("unknown error").to_string(),
                        code: entry["extensions"]["code"].as_str().map(String::from),
                    })
                    .collect::<Vec<GraphQlError>>()
            })
            .unwrap_or_default();

        if data.is_none() && errors.is_empty() {
            return Err(SearchError::parse(
                "GraphQL response carried neither data nor errors",
            ));
        }

        Ok(Self { data, errors })
    }

    /// Whether any error entry carries the invalid-signature code.
    #[must_use]
    pub fn has_invalid_signature_error(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.code.as_deref() == Some(INVALID_SIGNATURE_CODE))
    }

    /// The first error message, when any error is present.
    #[must_use]
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

// ============================================================================
// Query Client Trait
// ============================================================================

/// The query collaborator injected into the search dispatcher.
///
/// Implemented by [`GraphQlClient`] for real traffic and by mock clients
/// in tests.
pub trait QueryClient: Send + Sync {
    /// Execute one GraphQL document with the given variables.
    fn query(
        &self,
        document: &str,
        variables: Value,
    ) -> impl Future<Output = Result<GraphQlResponse, SearchError>> + Send;
}

// ============================================================================
// GraphQL Client
// ============================================================================

/// HTTP-backed GraphQL client.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GraphQlClient {
    /// Creates a new client for a GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    #[allow(dead_code)] // Public API
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SearchError> {
        Ok(Self {
            endpoint: endpoint.into(),
            client: build_http_client(&HttpConfig::default())?,
        })
    }

    /// Creates a client reusing an existing pooled HTTP client.
    #[must_use]
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// The endpoint URL this client talks to.
    #[must_use]
    #[allow(dead_code)] // Public API
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QueryClient for GraphQlClient {
    async fn query(&self, document: &str, variables: Value) -> Result<GraphQlResponse, SearchError> {
        let body = json!({
            "query": document,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(SearchError::Network)?;

        let payload: Value = response.json().await.map_err(SearchError::Network)?;
        GraphQlResponse::from_body(payload)
    }
}

// ============================================================================
// Tests
// ============================================================================
