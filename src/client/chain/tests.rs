use serde_json::json;

use super::transactions::parse_transactions_array;
use super::validators::{parse_performance_history, parse_vote_history};
use crate::test_utils::JsonMother;

#[test]
fn test_parse_transactions_array_skips_malformed_entries() {
    let feed = json!([
        JsonMother::transaction(),
        { "signatures": [] },
        JsonMother::failed_transaction(),
        "not even an object"
    ]);

    let transactions = parse_transactions_array(&feed);
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].signature(), "5sigTransfer");
}

#[test]
fn test_parse_transactions_array_handles_non_array() {
    assert!(parse_transactions_array(&json!(null)).is_empty());
    assert!(parse_transactions_array(&json!({})).is_empty());
}

#[test]
fn test_parse_vote_history() {
    let payload = json!([
        { "slot": 100, "confirmationCount": 31 },
        { "confirmationCount": 2 },
        { "slot": 101 }
    ]);

    let votes = parse_vote_history(&payload);
    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].slot, 100);
    assert_eq!(votes[0].confirmation_count, 31);
    assert_eq!(votes[1].slot, 101);
    assert_eq!(votes[1].confirmation_count, 0);
}

#[test]
fn test_parse_performance_history() {
    let payload = json!([
        { "epoch": 500, "leaderSlots": 200, "blocksProduced": 190 },
        { "leaderSlots": 10 }
    ]);

    let samples = parse_performance_history(&payload);
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].epoch, 500);
    assert_eq!(samples[0].production_rate(), 0.95);
}
