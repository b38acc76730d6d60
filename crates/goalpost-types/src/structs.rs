//! Core entity structs: goals, goal templates, and transition events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GoalOutcome, GoalStatus};
use crate::ids::{GoalId, ResourceKey};

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

/// A player-declared target for a resource's per-turn production rate,
/// bounded by a turn budget.
///
/// `turns_remaining` is signed: goals created with a non-positive budget
/// are accepted as given and count further below zero until they are
/// evaluated and fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Goal {
    /// Unique identifier, stable for the goal's lifetime.
    pub id: GoalId,
    /// Resource whose production delta is compared against the target.
    pub resource_key: ResourceKey,
    /// Per-turn production that must be reached or exceeded.
    #[ts(as = "String")]
    pub target_amount: Decimal,
    /// Total turns allotted at creation. Never changes.
    pub turns_limit: i64,
    /// Turns left before the goal fails. Only the turn advance decrements it.
    pub turns_remaining: i64,
    /// Human-readable label, opaque to the engine.
    pub description: String,
    /// Current lifecycle state.
    pub status: GoalStatus,
    /// Turn counter value when the goal was created.
    pub start_turn: u64,
    /// Turn on which the goal completed or failed, if it has.
    pub resolved_turn: Option<u64>,
    /// Wall-clock creation time.
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Number of turns that have elapsed against this goal's budget.
    pub const fn turns_elapsed(&self) -> i64 {
        self.turns_limit.saturating_sub(self.turns_remaining)
    }
}

// ---------------------------------------------------------------------------
// Goal template
// ---------------------------------------------------------------------------

/// An immutable goal preset used to seed new goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GoalTemplate {
    /// Resource to target.
    pub resource_key: ResourceKey,
    /// Per-turn production to reach.
    #[ts(as = "String")]
    pub target_amount: Decimal,
    /// Turn budget.
    pub turns_limit: i64,
    /// Human-readable description shown to the player.
    pub description: String,
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Emitted once for every goal that leaves the active state.
///
/// The host can poll these from the turn summary instead of (or in addition
/// to) registering per-goal callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GoalTransition {
    /// Snapshot of the goal after the transition was applied.
    pub goal: Goal,
    /// Whether the goal completed or failed.
    pub outcome: GoalOutcome,
    /// Turn on which the transition happened.
    pub turn: u64,
}

impl core::fmt::Display for GoalTransition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.outcome {
            GoalOutcome::Completed => write!(f, "Goal achieved: {}", self.goal.description),
            GoalOutcome::Failed => write!(f, "Goal failed: {}", self.goal.description),
        }
    }
}

/// Number of goals in each lifecycle partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GoalCounts {
    /// Goals still being tracked.
    pub active: u32,
    /// Goals that reached their target.
    pub completed: u32,
    /// Goals that ran out of turns.
    pub failed: u32,
}
