//! Validator and vote account types.
//!
//! Vote accounts classify as plain address results; the types here cover
//! the vote-state fields carried by their payloads and the secondary
//! vote-history and performance fetches that augment the detail view.

use serde_json::Value;

use super::account::{json_address, json_u64};

// ============================================================================
// Vote State
// ============================================================================

/// A recent vote recorded in a vote account's state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoteLot {
    /// The slot voted on.
    pub slot: u64,
    /// How many confirmations the vote has accumulated.
    pub confirmation_count: u64,
}

/// Credits earned by a validator in one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EpochCredits {
    /// The epoch the credits were earned in.
    pub epoch: u64,
    /// Cumulative credits at the end of the epoch.
    pub credits: u64,
    /// Cumulative credits at the end of the previous epoch.
    pub previous_credits: u64,
}

/// Vote-state fields carried by a vote account payload.
///
/// Presence of `votes` and `node` is what marks an account payload as a
/// vote account; these fields ride along with the base account data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoteState {
    /// Identity address of the validator node.
    pub node: String,
    /// Commission taken on rewards, in percent.
    pub commission: u64,
    /// Recent votes, oldest first.
    pub votes: Vec<VoteLot>,
    /// Per-epoch credit history.
    pub epoch_credits: Vec<EpochCredits>,
    /// The highest rooted slot, when reported.
    pub root_slot: Option<u64>,
}

impl VoteState {
    /// Parse vote-state fields from an account payload, if present.
    ///
    /// Returns `None` when the payload does not carry both `votes` and
    /// `node`, which is the structural marker for vote accounts.
    #[must_use]
    pub fn from_json(json: &Value) -> Option<Self> {
        let votes_json = json["votes"].as_array()?;
        let node = json_address(&json["node"])?;

        let votes = votes_json
            .iter()
            .filter_map(|v| {
                Some(VoteLot {
                    slot: json_u64(&v["slot"])?,
                    confirmation_count: json_u64(&v["confirmationCount"]).unwrap_or(0),
                })
            })
            .collect();

        let epoch_credits = json["epochCredits"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| {
                        Some(EpochCredits {
                            epoch: json_u64(&e["epoch"])?,
                            credits: json_u64(&e["credits"]).unwrap_or(0),
                            previous_credits: json_u64(&e["previousCredits"]).unwrap_or(0),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            node,
            commission: json_u64(&json["commission"]).unwrap_or(0),
            votes,
            epoch_credits,
            root_slot: json_u64(&json["rootSlot"]),
        })
    }

    /// Credits earned in the most recent recorded epoch.
    #[must_use]
    pub fn latest_epoch_credits(&self) -> Option<u64> {
        self.epoch_credits
            .last()
            .map(|e| e.credits.saturating_sub(e.previous_credits))
    }
}

// ============================================================================
// Augmentation Payload
// ============================================================================

/// One epoch's performance sample from the performance-history query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerformanceSample {
    /// The sampled epoch.
    pub epoch: u64,
    /// Slots the validator was scheduled to lead.
    pub leader_slots: u64,
    /// Blocks actually produced.
    pub blocks_produced: u64,
}

impl PerformanceSample {
    /// Fraction of scheduled slots that produced a block.
    #[must_use]
    pub fn production_rate(&self) -> f64 {
        if self.leader_slots == 0 {
            return 0.0;
        }
        self.blocks_produced as f64 / self.leader_slots as f64
    }
}

/// The combined result of the two secondary validator queries.
///
/// Fetched after classification; failure to load this never affects the
/// already-classified account result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatorDetails {
    /// Historical votes beyond the account's in-state window.
    pub vote_history: Vec<VoteLot>,
    /// Per-epoch block production samples.
    pub performance: Vec<PerformanceSample>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vote_state_from_json() {
        let payload = json!({
            "address": "voteAcc1",
            "lamports": 1,
            "node": { "address": "identity1" },
            "commission": 7,
            "votes": [
                { "slot": 100, "confirmationCount": 31 },
                { "slot": 101, "confirmationCount": 30 }
            ],
            "epochCredits": [
                { "epoch": 500, "credits": 12_000, "previousCredits": 11_000 },
                { "epoch": 501, "credits": 13_500, "previousCredits": 12_000 }
            ],
            "rootSlot": 99
        });

        let state = VoteState::from_json(&payload).expect("vote fields present");
        assert_eq!(state.node, "identity1");
        assert_eq!(state.commission, 7);
        assert_eq!(state.votes.len(), 2);
        assert_eq!(state.votes[0].slot, 100);
        assert_eq!(state.root_slot, Some(99));
        assert_eq!(state.latest_epoch_credits(), Some(1500));
    }

    #[test]
    fn test_vote_state_requires_votes_and_node() {
        let no_node = json!({ "votes": [] });
        assert!(VoteState::from_json(&no_node).is_none());

        let no_votes = json!({ "node": { "address": "id1" } });
        assert!(VoteState::from_json(&no_votes).is_none());
    }

    #[test]
    fn test_production_rate() {
        let sample = PerformanceSample {
            epoch: 1,
            leader_slots: 200,
            blocks_produced: 150,
        };
        assert_eq!(sample.production_rate(), 0.75);

        let idle = PerformanceSample::default();
        assert_eq!(idle.production_rate(), 0.0);
    }
}
