//! Turn advance: the one place the clock and goal deadlines move together.
//!
//! The host runs its economic simulation and commits the results into the
//! production lookup first. It then advances the engine, which runs three
//! phases:
//!
//! 1. **Clock** -- advance the turn counter by one. On overflow the turn
//!    fails here, before any goal is touched.
//! 2. **Countdown** -- decrement `turns_remaining` on every goal that is
//!    active at the start of the turn.
//! 3. **Evaluation** -- apply the transition rule against the committed
//!    production and fire callbacks.
//!
//! Turns are one-directional; there is no rollback.

use goalpost_types::{GoalCounts, GoalTransition};
use tracing::{debug, info};

use crate::clock::{ClockError, TurnClock};
use crate::registry::{GoalError, GoalRegistry};
use crate::resource::ResourceProvider;

/// Errors that can occur while advancing a turn.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The turn counter could not advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// Goal evaluation was aborted.
    #[error("goal error: {source}")]
    Goal {
        /// The underlying goal error.
        #[from]
        source: GoalError,
    },
}

/// Summary of a single turn advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    /// The turn number reached.
    pub turn: u64,
    /// Goals that completed or failed this turn, in registry order.
    pub transitions: Vec<GoalTransition>,
    /// Partition sizes after evaluation.
    pub counts: GoalCounts,
}

/// Advance `clock` by one turn and evaluate every active goal in
/// `registry` against `provider`.
///
/// Hosts reach this through [`GoalEngine::advance`](crate::GoalEngine::advance),
/// which owns both halves.
pub(crate) fn advance_turn(
    clock: &mut TurnClock,
    registry: &mut GoalRegistry,
    provider: &dyn ResourceProvider,
) -> Result<TurnSummary, TurnError> {
    // --- Phase 1: Clock ---
    let turn = clock.advance()?;

    // --- Phase 2: Countdown ---
    let counted = registry.count_down();
    debug!(turn, goals = counted, "Goal countdown applied");

    // --- Phase 3: Evaluation ---
    let transitions = registry.evaluate(provider, turn)?;
    let counts = registry.counts();

    info!(
        turn,
        resolved = transitions.len(),
        active = counts.active,
        completed = counts.completed,
        failed = counts.failed,
        "Turn advanced"
    );

    Ok(TurnSummary {
        turn,
        transitions,
        counts,
    })
}
