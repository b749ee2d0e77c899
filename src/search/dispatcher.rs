//! Query dispatch for user searches.
//!
//! [`SearchEngine`] turns a raw search string into the right lookups
//! against the injected [`QueryClient`], classifies every returned payload
//! (see [`super::classify`]), and merges the results under one error
//! policy.
//!
//! Ordering is deliberate: accounts resolve before transactions. An
//! address-shaped string never triggers a signature lookup unless account
//! resolution yielded nothing, and that sequencing is enforced by awaiting
//! the account step to completion first.

use serde_json::{Value, json};

use crate::client::{
    ACCOUNT_LOOKUP_QUERY, GraphQlResponse, QueryClient, TRANSACTION_LOOKUP_QUERY,
};
use crate::domain::{SearchError, SearchResult};

use super::classify::classify_payload;
use super::input::{SearchFilter, SearchFilters, StatusFilter, classify_input_shape};

// ============================================================================
// Search Query
// ============================================================================

/// One search invocation: the raw text and the filters active when the
/// user submitted it. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    /// The raw input text.
    pub text: String,
    /// Filters active for this invocation.
    pub filters: SearchFilters,
}

impl SearchQuery {
    /// Creates a query over trimmed input text.
    #[must_use]
    pub fn new(text: impl Into<String>, filters: SearchFilters) -> Self {
        Self {
            text: text.into().trim().to_string(),
            filters,
        }
    }
}

// ============================================================================
// Search Engine
// ============================================================================

/// The query dispatcher.
///
/// Owns nothing but the injected query client; all lookups are reads and
/// results are handed back to the caller.
#[derive(Debug, Clone)]
pub struct SearchEngine<C> {
    client: C,
}

impl<C: QueryClient> SearchEngine<C> {
    /// Creates an engine around an injected query client.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// A reference to the injected client.
    #[must_use]
    #[allow(dead_code)] // Used by tests substituting a mock client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one search.
    ///
    /// 1. For address-shaped input with an account-compatible filter, look
    ///    up accounts and classify each payload, keeping those the filter
    ///    permits.
    /// 2. Only if step 1 produced nothing and the filter permits
    ///    transactions, look up the input as a signature. Inputs that are
    ///    not signature-shaped are rejected locally before any network
    ///    call; invalid-signature errors (local or remote) surface only
    ///    under an explicit Transaction filter and are otherwise treated
    ///    as "no results here".
    /// 3. Zero results overall is an empty success, not an error.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` per the policy above; account-lookup failures
    /// never abort the transaction fallback.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        let text = query.text.trim();
        let shape = classify_input_shape(text);
        let types = query.filters.types;

        let mut results = Vec::new();
        let mut account_error: Option<SearchError> = None;

        if shape.looks_like_address && types.allows_accounts() {
            match self.lookup_accounts(text, types).await {
                Ok(mut found) => results.append(&mut found),
                Err(e) => {
                    tracing::warn!("account lookup failed, continuing to fallback: {e}");
                    account_error = Some(e);
                }
            }
        }

        // The fallback runs only once the account step has fully resolved.
        if results.is_empty() && types.allows_transactions() {
            match self.lookup_transaction(text, &query.filters).await {
                Ok(mut found) => results.append(&mut found),
                Err(e) if e.is_invalid_signature() => {
                    if types == SearchFilter::Transaction {
                        return Err(e);
                    }
                    tracing::debug!("signature lookup suppressed under broad filter: {e}");
                }
                Err(e) => {
                    if account_error.is_none() || types == SearchFilter::Transaction {
                        return Err(e);
                    }
                    tracing::warn!("transaction fallback failed: {e}");
                }
            }
        }

        if results.is_empty()
            && let Some(e) = account_error
        {
            return Err(e);
        }

        results.retain(|result| passes_status(result, query.filters.status));
        Ok(results)
    }

    /// Issue the account lookup and classify everything it returns.
    ///
    /// The endpoint may answer with a single account, or with token and
    /// contract lists for multi-match queries; every payload goes through
    /// the classifier and only filter-permitted kinds are kept. Malformed
    /// entries are logged and dropped without failing the batch.
    async fn lookup_accounts(
        &self,
        address: &str,
        types: SearchFilter,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let variables = json!({ "address": address });
        let response = self.client.query(ACCOUNT_LOOKUP_QUERY, variables).await?;

        let data = response_data(response)?;

        let mut payloads: Vec<Value> = Vec::new();
        if data["account"].is_object() {
            payloads.push(data["account"].clone());
        }
        for key in ["tokens", "contracts"] {
            if let Some(entries) = data[key].as_array() {
                payloads.extend(entries.iter().filter(|e| e.is_object()).cloned());
            }
        }

        let mut results = Vec::new();
        for payload in &payloads {
            match classify_payload(payload) {
                Ok(Some(result)) => {
                    if kind_allowed(&result, types) {
                        results.push(result);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("dropping malformed account payload: {e}");
                }
            }
        }

        Ok(results)
    }

    /// Issue the transaction lookup, treating the input as a signature.
    async fn lookup_transaction(
        &self,
        signature: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, SearchError> {
        // Pre-flight: reject malformed signatures before any network call.
        let shape = classify_input_shape(signature);
        if !shape.looks_like_signature {
            return Err(SearchError::invalid_signature(signature));
        }

        let variables = json!({
            "signature": signature,
            "since": filters.time_range.as_secs(),
        });
        let response = self
            .client
            .query(TRANSACTION_LOOKUP_QUERY, variables)
            .await?;

        if response.has_invalid_signature_error() {
            return Err(SearchError::remote_invalid_signature(signature));
        }

        let data = response_data(response)?;
        let payload = &data["transaction"];
        if !payload.is_object() {
            return Ok(Vec::new());
        }

        // Classification still runs on the payload; the transport's word
        // that this is a transaction is not taken for it.
        match classify_payload(payload) {
            Ok(Some(result @ SearchResult::Transaction(_))) => Ok(vec![result]),
            Ok(Some(_)) | Ok(None) => {
                tracing::warn!("transaction lookup returned a non-transaction payload");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Unwrap the data object of a response, mapping GraphQL errors to
/// `SearchError::Parse`.
fn response_data(response: GraphQlResponse) -> Result<Value, SearchError> {
    match response.data {
        Some(data) => Ok(data),
        None => {
            let message = response
                .errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "empty GraphQL response".to_string());
            Err(SearchError::parse(message))
        }
    }
}

/// Whether a classified result passes the active type filter.
fn kind_allowed(result: &SearchResult, types: SearchFilter) -> bool {
    match types {
        SearchFilter::All => true,
        SearchFilter::Transaction => matches!(result, SearchResult::Transaction(_)),
        SearchFilter::Address => matches!(result, SearchResult::Account(_)),
        SearchFilter::Token => matches!(result, SearchResult::Token(_)),
        SearchFilter::Program => matches!(result, SearchResult::Program(_)),
    }
}

/// Whether a result passes the status filter. Only transactions carry a
/// status; account results always pass.
fn passes_status(result: &SearchResult, status: StatusFilter) -> bool {
    let SearchResult::Transaction(txn) = result else {
        return true;
    };
    match status {
        StatusFilter::Any => true,
        StatusFilter::Success => txn.err.is_none(),
        StatusFilter::Failed => txn.err.is_some(),
    }
}

/// Whether a classified result should trigger the validator augmentation
/// fetch. Runs after classification, never as part of it.
#[must_use]
pub fn needs_validator_augmentation(result: &SearchResult) -> bool {
    matches!(result, SearchResult::Account(account) if account.is_vote_account())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::input::TimeRange;
    use crate::test_utils::JsonMother;
    use std::sync::Mutex;

    /// Test double for the query collaborator. Records which documents
    /// were dispatched so ordering and skipping can be asserted.
    #[derive(Default)]
    struct MockQueryClient {
        account_data: Option<Value>,
        transaction_data: Option<Value>,
        transaction_error_code: Option<&'static str>,
        fail_accounts: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockQueryClient {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl QueryClient for MockQueryClient {
        async fn query(
            &self,
            document: &str,
            _variables: Value,
        ) -> Result<GraphQlResponse, SearchError> {
            if document.contains("AccountLookup") {
                self.calls.lock().unwrap().push("accounts");
                if self.fail_accounts {
                    return Err(SearchError::parse("account lookup exploded"));
                }
                let data = self
                    .account_data
                    .clone()
                    .unwrap_or_else(|| json!({ "account": null }));
                return Ok(GraphQlResponse::of_data(data));
            }

            if document.contains("TransactionLookup") {
                self.calls.lock().unwrap().push("transactions");
                if let Some(code) = self.transaction_error_code {
                    return Ok(GraphQlResponse {
                        data: None,
                        errors: vec![crate::client::GraphQlError {
                            message: "rejected".to_string(),
                            code: Some(code.to_string()),
                        }],
                    });
                }
                let data = self
                    .transaction_data
                    .clone()
                    .unwrap_or_else(|| json!({ "transaction": null }));
                return Ok(GraphQlResponse::of_data(data));
            }

            Err(SearchError::parse(format!("unexpected document: {document}")))
        }
    }

    const SIGNATURE_88: &str = "3hijAG46JpNLpNjgKZMrMP7AB7vNAWw9qKM8K6THdRuyTQZv6LLAB9TTecq7hpQgURFHxm18ecGmj5yiw9iamhNS";
    const ADDRESS_34: &str = "1111111111111111111111111111111111";

    fn build_engine(mock: MockQueryClient) -> SearchEngine<MockQueryClient> {
        SearchEngine::new(mock)
    }

    #[tokio::test]
    async fn test_signature_shaped_input_skips_account_lookup() {
        // Scenario A: 88-char base58 input goes straight to the
        // transaction lookup.
        let mock = MockQueryClient {
            transaction_data: Some(json!({ "transaction": JsonMother::transaction() })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(SIGNATURE_88, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], SearchResult::Transaction(_)));
        assert_eq!(engine.client().calls(), vec!["transactions"]);
    }

    #[tokio::test]
    async fn test_executable_account_classifies_as_program() {
        // Scenario B: 34-char address, payload with executable:true and no
        // mint/owner fields.
        let mock = MockQueryClient {
            account_data: Some(json!({
                "account": {
                    "address": ADDRESS_34,
                    "lamports": 1,
                    "executable": true
                }
            })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(ADDRESS_34, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], SearchResult::Program(_)));
        assert_eq!(engine.client().calls(), vec!["accounts"]);
    }

    #[tokio::test]
    async fn test_empty_everywhere_is_an_empty_success() {
        // Scenario C: signature-shaped input, both lookups empty; the
        // outcome is Ok(vec![]), not an error.
        let engine = build_engine(MockQueryClient::default());

        let query = SearchQuery::new(SIGNATURE_88, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(engine.client().calls(), vec!["transactions"]);
    }

    #[tokio::test]
    async fn test_token_fields_win_over_base_account() {
        // Scenario D: a payload with address+lamports+mint+owner is a
        // token, not a base account.
        let mock = MockQueryClient {
            account_data: Some(json!({
                "account": {
                    "address": ADDRESS_34,
                    "lamports": 2_039_280,
                    "mint": { "address": "mint1", "decimals": 6 },
                    "owner": { "address": "wallet1" },
                    "amount": "100"
                }
            })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(ADDRESS_34, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], SearchResult::Token(_)));
    }

    #[tokio::test]
    async fn test_account_hit_suppresses_transaction_fallback() {
        let mock = MockQueryClient {
            account_data: Some(json!({ "account": JsonMother::base_account() })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(
            "So11111111111111111111111111111111111111112",
            SearchFilters::default(),
        );
        let results = engine.search(&query).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(engine.client().calls(), vec!["accounts"]);
    }

    #[tokio::test]
    async fn test_local_invalid_signature_short_circuits_without_network() {
        // A 50-char input cannot be a signature; under an explicit
        // Transaction filter the rejection is local and surfaced.
        let engine = build_engine(MockQueryClient::default());

        let query = SearchQuery::new(
            "5".repeat(50),
            SearchFilters::of_type(SearchFilter::Transaction),
        );
        let err = engine.search(&query).await.unwrap_err();

        assert!(matches!(err, SearchError::InvalidSignatureFormat { .. }));
        assert!(engine.client().calls().is_empty());
    }

    #[tokio::test]
    async fn test_local_invalid_signature_suppressed_under_all_filter() {
        // Address-shaped input, empty account lookup: the signature
        // fallback fails shape validation but the error is suppressed.
        let engine = build_engine(MockQueryClient::default());

        let query = SearchQuery::new(ADDRESS_34, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(engine.client().calls(), vec!["accounts"]);
    }

    #[tokio::test]
    async fn test_remote_invalid_signature_surfaced_only_for_transaction_filter() {
        let mock = MockQueryClient {
            transaction_error_code: Some("INVALID_SIGNATURE"),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(
            SIGNATURE_88,
            SearchFilters::of_type(SearchFilter::Transaction),
        );
        let err = engine.search(&query).await.unwrap_err();
        assert!(matches!(err, SearchError::RemoteInvalidSignature { .. }));

        // Same condition under All is an empty success.
        let mock = MockQueryClient {
            transaction_error_code: Some("INVALID_SIGNATURE"),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(SIGNATURE_88, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_account_error_surfaces_after_fallback_resolves() {
        let mock = MockQueryClient {
            fail_accounts: true,
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(ADDRESS_34, SearchFilters::default());
        let err = engine.search(&query).await.unwrap_err();

        assert!(matches!(err, SearchError::Parse { .. }));
        // Only the account document went out; the fallback was attempted
        // but rejected locally (address-shaped input is not a signature).
        assert_eq!(engine.client().calls(), vec!["accounts"]);
    }

    #[tokio::test]
    async fn test_type_filter_keeps_only_matching_kinds() {
        let mock = MockQueryClient {
            account_data: Some(json!({
                "account": JsonMother::base_account(),
                "tokens": [JsonMother::token_account()],
                "contracts": [JsonMother::program_account()]
            })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(ADDRESS_34, SearchFilters::of_type(SearchFilter::Token));
        let results = engine.search(&query).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], SearchResult::Token(_)));
    }

    #[tokio::test]
    async fn test_malformed_batch_entry_is_dropped_not_fatal() {
        // One unrecognizable entry in the tokens list must not fail the
        // whole response.
        let mock = MockQueryClient {
            account_data: Some(json!({
                "account": null,
                "tokens": [
                    JsonMother::token_account(),
                    { "garbage": true },
                    JsonMother::token_account()
                ]
            })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let query = SearchQuery::new(ADDRESS_34, SearchFilters::default());
        let results = engine.search(&query).await.unwrap();

        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_status_filter_drops_failed_transactions() {
        let mock = MockQueryClient {
            transaction_data: Some(json!({ "transaction": JsonMother::failed_transaction() })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        let filters = SearchFilters {
            types: SearchFilter::Transaction,
            time_range: TimeRange::Any,
            status: StatusFilter::Success,
        };
        let query = SearchQuery::new(SIGNATURE_88, filters);
        let results = engine.search(&query).await.unwrap();
        assert!(results.is_empty());

        // Failed filter keeps it
        let mock = MockQueryClient {
            transaction_data: Some(json!({ "transaction": JsonMother::failed_transaction() })),
            ..Default::default()
        };
        let engine = build_engine(mock);
        let filters = SearchFilters {
            types: SearchFilter::Transaction,
            time_range: TimeRange::Any,
            status: StatusFilter::Failed,
        };
        let query = SearchQuery::new(SIGNATURE_88, filters);
        let results = engine.search(&query).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_transaction_filter_never_issues_account_lookup() {
        let mock = MockQueryClient {
            transaction_data: Some(json!({ "transaction": JsonMother::transaction() })),
            ..Default::default()
        };
        let engine = build_engine(mock);

        // Address-shaped input under a Transaction filter: the account
        // step is filtered out, and the fallback rejects the shape.
        let query = SearchQuery::new(
            ADDRESS_34,
            SearchFilters::of_type(SearchFilter::Transaction),
        );
        let err = engine.search(&query).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidSignatureFormat { .. }));
        assert!(engine.client().calls().is_empty());
    }

    #[test]
    fn test_needs_validator_augmentation() {
        let vote = classify_payload(&JsonMother::vote_account()).unwrap().unwrap();
        assert!(needs_validator_augmentation(&vote));

        let plain = classify_payload(&JsonMother::base_account()).unwrap().unwrap();
        assert!(!needs_validator_augmentation(&plain));

        let program = classify_payload(&JsonMother::program_account()).unwrap().unwrap();
        assert!(!needs_validator_augmentation(&program));
    }
}
