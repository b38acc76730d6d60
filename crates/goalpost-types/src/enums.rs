//! Enumeration types for goal lifecycle state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Goal status
// ---------------------------------------------------------------------------

/// Lifecycle state of a production goal.
///
/// A goal starts [`Active`](GoalStatus::Active) and moves at most once into
/// one of the two terminal states. There is no path back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GoalStatus {
    /// Still being tracked; evaluated every turn.
    Active,
    /// Production reached the target before the turn budget ran out.
    Completed,
    /// The turn budget ran out with production still below target.
    Failed,
}

// ---------------------------------------------------------------------------
// Goal outcome
// ---------------------------------------------------------------------------

/// The terminal outcome of a goal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GoalOutcome {
    /// The goal reached its production target.
    Completed,
    /// The goal ran out of turns.
    Failed,
}

impl GoalOutcome {
    /// The status a goal holds after this outcome.
    pub const fn status(self) -> GoalStatus {
        match self {
            Self::Completed => GoalStatus::Completed,
            Self::Failed => GoalStatus::Failed,
        }
    }
}

impl core::fmt::Display for GoalOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}
