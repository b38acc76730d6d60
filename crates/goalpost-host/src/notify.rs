//! Goal notifications.
//!
//! The host's stand-in for on-screen toasts: each terminal transition is
//! reported once through the log.

use goalpost_core::CallbackError;
use goalpost_types::Goal;
use tracing::{info, warn};

/// Success callback: report the achieved goal.
pub fn goal_achieved(goal: &Goal) -> Result<(), CallbackError> {
    info!(
        goal_id = %goal.id,
        turn = goal.resolved_turn,
        "Goal achieved: {}",
        goal.description
    );
    Ok(())
}

/// Failure callback: report the failed goal.
pub fn goal_failed(goal: &Goal) -> Result<(), CallbackError> {
    warn!(
        goal_id = %goal.id,
        turn = goal.resolved_turn,
        "Goal failed: {}",
        goal.description
    );
    Ok(())
}
