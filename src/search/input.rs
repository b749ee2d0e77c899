//! Lexical classification of raw search input and filter types.
//!
//! This module decides what a search string can possibly be before any
//! network call happens: addresses and transaction signatures are both
//! base58, but their length ranges do not overlap, so a single input
//! matches at most one shape.

// ============================================================================
// Search Filter
// ============================================================================

/// The active result-type filter for a search.
///
/// This determines which lookups are issued and which classified results
/// are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    /// Accept every result kind.
    #[default]
    All,
    /// Transactions only.
    Transaction,
    /// Base accounts only.
    Address,
    /// Token accounts only.
    Token,
    /// Program accounts only.
    Program,
}

impl SearchFilter {
    /// Returns the display string for this filter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Transaction => "Transaction",
            Self::Address => "Address",
            Self::Token => "Token",
            Self::Program => "Program",
        }
    }

    /// Cycles to the next filter.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Transaction,
            Self::Transaction => Self::Address,
            Self::Address => Self::Token,
            Self::Token => Self::Program,
            Self::Program => Self::All,
        }
    }

    /// Whether this filter permits issuing an account lookup.
    #[must_use]
    pub const fn allows_accounts(self) -> bool {
        matches!(self, Self::All | Self::Address | Self::Token | Self::Program)
    }

    /// Whether this filter permits issuing a transaction lookup.
    #[must_use]
    pub const fn allows_transactions(self) -> bool {
        matches!(self, Self::All | Self::Transaction)
    }
}

// ============================================================================
// Time and Status Filters
// ============================================================================

/// Time window restriction applied to lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// No restriction.
    #[default]
    Any,
    /// The last hour.
    Hour,
    /// The last day.
    Day,
    /// The last week.
    Week,
}

impl TimeRange {
    /// The window length in seconds, `None` for no restriction.
    #[must_use]
    pub const fn as_secs(self) -> Option<u64> {
        match self {
            Self::Any => None,
            Self::Hour => Some(3600),
            Self::Day => Some(86_400),
            Self::Week => Some(604_800),
        }
    }
}

/// Execution-status restriction applied to transaction results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Keep successes and failures.
    #[default]
    Any,
    /// Keep successful transactions only.
    Success,
    /// Keep failed transactions only.
    Failed,
}

/// The full filter set for one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchFilters {
    /// Result-type filter.
    pub types: SearchFilter,
    /// Time window restriction.
    pub time_range: TimeRange,
    /// Transaction status restriction.
    pub status: StatusFilter,
}

impl SearchFilters {
    /// Filters keeping only the given result type, no other restrictions.
    #[must_use]
    pub fn of_type(types: SearchFilter) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }
}

// ============================================================================
// Input Shape
// ============================================================================

/// Minimum length of an address-shaped input.
pub const ADDRESS_MIN_CHARS: usize = 32;
/// Maximum length of an address-shaped input.
pub const ADDRESS_MAX_CHARS: usize = 44;
/// Minimum length of a signature-shaped input.
pub const SIGNATURE_MIN_CHARS: usize = 87;
/// Maximum length of a signature-shaped input.
pub const SIGNATURE_MAX_CHARS: usize = 88;

/// What a raw input string can lexically be.
///
/// The two flags are mutually exclusive because the length ranges do not
/// overlap; both are false for inputs that are neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputShape {
    /// The input matches the base58 alphabet at address length (32-44).
    pub looks_like_address: bool,
    /// The input matches the base58 alphabet at signature length (87-88).
    pub looks_like_signature: bool,
}

/// Whether a character belongs to the base58 alphabet.
///
/// base58 is the standard alphanumeric set minus the ambiguous characters
/// `0`, `O`, `I`, and `l`.
#[must_use]
pub const fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Classify a raw input string by shape.
///
/// Purely lexical; no decoding and no network access.
#[must_use]
pub fn classify_input_shape(text: &str) -> InputShape {
    let trimmed = text.trim();

    if trimmed.is_empty() || !trimmed.chars().all(is_base58_char) {
        return InputShape::default();
    }

    let len = trimmed.chars().count();
    InputShape {
        looks_like_address: (ADDRESS_MIN_CHARS..=ADDRESS_MAX_CHARS).contains(&len),
        looks_like_signature: (SIGNATURE_MIN_CHARS..=SIGNATURE_MAX_CHARS).contains(&len),
    }
}

// ============================================================================
// Search Suggestions
// ============================================================================

/// Get a live suggestion line for the search popup.
///
/// Provides hints and validation feedback as the user types, based on the
/// lexical shape of the current query and the active filter.
#[must_use]
pub fn search_suggestion(query: &str, filter: SearchFilter) -> String {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return match filter {
            SearchFilter::Transaction => {
                "Enter a transaction signature (87-88 base58 characters)".to_string()
            }
            SearchFilter::All => {
                "Enter an address (32-44 chars) or a signature (87-88 chars)".to_string()
            }
            _ => "Enter an account address (32-44 base58 characters)".to_string(),
        };
    }

    if let Some(bad) = trimmed.chars().find(|c| !is_base58_char(*c)) {
        return format!(
            "'{}' is not a base58 character. Addresses and signatures avoid 0, O, I and l.",
            bad
        );
    }

    let shape = classify_input_shape(trimmed);
    let len = trimmed.chars().count();

    if shape.looks_like_signature {
        if filter.allows_transactions() {
            "Valid signature format. Press Enter to search.".to_string()
        } else {
            format!(
                "Signature-shaped input, but the {} filter only matches accounts.",
                filter.as_str()
            )
        }
    } else if shape.looks_like_address {
        if filter == SearchFilter::Transaction {
            "Address-shaped input, but the Transaction filter needs an 87-88 char signature."
                .to_string()
        } else {
            "Valid address format. Press Enter to search.".to_string()
        }
    } else if len < ADDRESS_MIN_CHARS {
        format!(
            "Too short ({} chars). Addresses are 32-44 characters, signatures 87-88.",
            len
        )
    } else if len <= SIGNATURE_MAX_CHARS {
        format!(
            "{} chars is neither address (32-44) nor signature (87-88) length.",
            len
        )
    } else {
        format!("Too long ({} chars). Signatures are at most 88 characters.", len)
    }
}

// ============================================================================
// Tests
// ============================================================================
