//! Search core: input shaping, query dispatch, and result classification.
//!
//! Control flow: user input -> [`dispatcher::SearchEngine`] issues one or
//! more lookups against the injected query client -> raw payloads flow
//! through [`classify`] -> tagged [`crate::domain::SearchResult`] values
//! are handed to the detail panels for rendering.

pub mod classify;
pub mod dispatcher;
pub mod input;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{ResultKind, classify, classify_payload};
pub use dispatcher::{SearchEngine, SearchQuery, needs_validator_augmentation};
pub use input::{
    InputShape, SearchFilter, SearchFilters, StatusFilter, TimeRange, classify_input_shape,
    search_suggestion,
};
