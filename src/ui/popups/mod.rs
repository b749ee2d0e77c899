//! Modal popup rendering: search, results, messages, cluster selection,
//! and help.

pub mod help;
pub mod message;
pub mod network;
pub mod search;
pub mod search_results;
