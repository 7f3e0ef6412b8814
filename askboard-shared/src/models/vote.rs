/// Vote model
///
/// A vote associates one user with one target (a question or an answer)
/// and a direction. There is at most one vote per (user, target): voting
/// again replaces the previous vote instead of adding to it.
///
/// # Re-voting
///
/// | previous | new  | result          |
/// |----------|------|-----------------|
/// | none     | up   | up (+1)         |
/// | up       | up   | removed (-1)    |
/// | up       | down | down (-2)       |
/// | down     | up   | up (+2)         |
///
/// The number in parentheses is the change applied to the target's total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What kind of record a vote or comment points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Question,
    Answer,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Question => "question",
            TargetType::Answer => "answer",
        }
    }
}

/// A question or answer, by ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Target record ID
    pub id: Uuid,

    /// Target record kind
    #[serde(rename = "type")]
    pub target_type: TargetType,
}

impl Target {
    pub fn question(id: Uuid) -> Self {
        Self {
            id,
            target_type: TargetType::Question,
        }
    }

    pub fn answer(id: Uuid) -> Self {
        Self {
            id,
            target_type: TargetType::Answer,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target_type.as_str(), self.id)
    }
}

/// Vote direction, serialized as `1` / `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Signed weight of this vote
    pub fn weight(&self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i8> for VoteValue {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(format!("vote value must be 1 or -1, got {}", other)),
        }
    }
}

impl From<VoteValue> for i8 {
    fn from(value: VoteValue) -> Self {
        match value {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

/// A recorded vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Voter
    pub user_id: Uuid,

    /// Voted-on record
    pub target: Target,

    /// Direction
    pub value: VoteValue,

    /// When this vote was (last) cast
    pub created_at: DateTime<Utc>,
}

/// Result of casting a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// The user's vote after the operation (`None` when toggled off)
    pub current: Option<VoteValue>,

    /// The target's new vote total
    pub total: i64,
}

/// Computes the vote that remains after `cast` is applied over `previous`,
/// and the change to apply to the target's total
pub fn apply_vote(previous: Option<VoteValue>, cast: VoteValue) -> (Option<VoteValue>, i64) {
    match previous {
        Some(prev) if prev == cast => (None, -prev.weight()),
        Some(prev) => (Some(cast), cast.weight() - prev.weight()),
        None => (Some(cast), cast.weight()),
    }
}
