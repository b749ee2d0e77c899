//! Error types for search and chain operations.
//!
//! This module defines the custom error types used throughout the client
//! and search code, providing structured error handling with messages that
//! are safe to show to the user.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Custom error type for chain lookups and search dispatch.
///
/// The variants mirror the failure modes of the search pipeline: local
/// pre-flight validation, remote rejection, transport failure, and the
/// degradable secondary fetches.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query is not a well-formed signature; rejected before any
    /// network call was made.
    #[error("invalid signature format: '{query}'")]
    InvalidSignatureFormat {
        /// The rejected input.
        query: String,
    },

    /// The remote endpoint rejected the query as a malformed signature.
    #[error("remote rejected signature: '{query}'")]
    RemoteInvalidSignature {
        /// The rejected input.
        query: String,
    },

    /// Transport-level failure from HTTP requests.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response envelope or payload that could not be decoded.
    #[error("parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// A secondary validator-detail fetch failed. The primary result is
    /// unaffected; callers degrade to showing base account data.
    #[error("validator details unavailable: {message}")]
    Augmentation {
        /// Description of the failed fetch.
        message: String,
    },
}

impl SearchError {
    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new invalid-signature-format error for a query.
    #[must_use]
    pub fn invalid_signature(query: impl Into<String>) -> Self {
        Self::InvalidSignatureFormat {
            query: query.into(),
        }
    }

    /// Create a new remote invalid-signature error for a query.
    #[must_use]
    pub fn remote_invalid_signature(query: impl Into<String>) -> Self {
        Self::RemoteInvalidSignature {
            query: query.into(),
        }
    }

    /// Create a new augmentation error.
    #[must_use]
    pub fn augmentation(message: impl Into<String>) -> Self {
        Self::Augmentation {
            message: message.into(),
        }
    }

    /// Returns whether this error means the input failed signature
    /// validation, locally or remotely. Both cases get the same user
    /// messaging.
    #[must_use]
    pub fn is_invalid_signature(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignatureFormat { .. } | Self::RemoteInvalidSignature { .. }
        )
    }

    /// A human-readable message suitable for the UI, distinct from the
    /// internal `Display` representation.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidSignatureFormat { query } | Self::RemoteInvalidSignature { query } => {
                format!(
                    "'{}' is not a valid transaction signature. Signatures are 87-88 base58 characters.",
                    query
                )
            }
            Self::Network(_) => {
                "Could not reach the cluster. Check your connection and try again.".to_string()
            }
            Self::Parse { .. } => "The cluster returned an unexpected response.".to_string(),
            Self::Augmentation { .. } => "Failed to load validator details.".to_string(),
        }
    }

    /// Convert to a `color_eyre::Report` for API compatibility.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let parse_err = SearchError::parse("bad envelope");
        assert_eq!(format!("{}", parse_err), "parse error: bad envelope");

        let sig_err = SearchError::invalid_signature("abc");
        assert_eq!(format!("{}", sig_err), "invalid signature format: 'abc'");

        let aug_err = SearchError::augmentation("timeout");
        assert_eq!(
            format!("{}", aug_err),
            "validator details unavailable: timeout"
        );
    }

    #[test]
    fn test_local_and_remote_signature_errors_share_user_message() {
        let local = SearchError::invalid_signature("xyz");
        let remote = SearchError::remote_invalid_signature("xyz");
        assert!(local.is_invalid_signature());
        assert!(remote.is_invalid_signature());
        assert_eq!(local.user_message(), remote.user_message());
    }

    #[test]
    fn test_user_message_differs_from_display() {
        let err = SearchError::parse("missing 'data' key");
        assert_ne!(format!("{}", err), err.user_message());
    }
}
