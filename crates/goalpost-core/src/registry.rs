//! Goal registry: the three lifecycle partitions and the transition rule.
//!
//! Every goal lives in exactly one of three ordered partitions: active,
//! completed, or failed. Goals enter the active partition on creation and
//! leave it at most once, during [`GoalRegistry::evaluate`]. Completed and
//! failed goals are archived in insertion order and never evaluated again.
//!
//! # Transition rule
//!
//! For each active goal, in registry order:
//!
//! 1. production >= target -> **completed** (`on_success` fires)
//! 2. otherwise, `turns_remaining <= 0` -> **failed** (`on_failure` fires)
//! 3. otherwise the goal stays active
//!
//! Success is checked first, so a goal that reaches its target on the same
//! pass its budget runs out still completes.
//!
//! # Callback failures
//!
//! A callback error aborts the pass. The transition that triggered it and
//! every earlier transition stay applied; the remaining goals stay active
//! and are not evaluated until the next pass. A panicking callback leaves
//! the partitions in the same state.

use std::collections::BTreeMap;

use chrono::Utc;
use goalpost_types::{
    Goal, GoalCounts, GoalId, GoalOutcome, GoalStatus, GoalTemplate, GoalTransition, ResourceKey,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::resource::ResourceProvider;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error raised by a goal callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    /// Description of what went wrong in the host.
    pub message: String,
}

impl CallbackError {
    /// Create a callback error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur during goal registry operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// Goal input rejected by strict validation.
    #[error("invalid goal: {reason}")]
    InvalidGoal {
        /// Explanation of what is wrong with the input.
        reason: String,
    },

    /// No template with the requested name exists in the catalog.
    #[error("unknown goal template: {name}")]
    UnknownTemplate {
        /// The requested template name.
        name: String,
    },

    /// A success or failure callback returned an error.
    #[error("{outcome} callback for goal {goal_id} failed: {source}")]
    Callback {
        /// The goal whose callback failed.
        goal_id: GoalId,
        /// Which transition the callback belonged to.
        outcome: GoalOutcome,
        /// The error returned by the callback.
        source: CallbackError,
    },
}

// ---------------------------------------------------------------------------
// Goal input and callbacks
// ---------------------------------------------------------------------------

/// Input for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    /// Resource to target.
    pub resource_key: ResourceKey,
    /// Per-turn production to reach.
    pub target_amount: Decimal,
    /// Turn budget.
    pub turns_limit: i64,
    /// Human-readable description.
    pub description: String,
}

impl NewGoal {
    /// Build goal input from its parts.
    pub fn new(
        resource_key: impl Into<ResourceKey>,
        target_amount: Decimal,
        turns_limit: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            resource_key: resource_key.into(),
            target_amount,
            turns_limit,
            description: description.into(),
        }
    }
}

impl From<&GoalTemplate> for NewGoal {
    fn from(template: &GoalTemplate) -> Self {
        Self {
            resource_key: template.resource_key.clone(),
            target_amount: template.target_amount,
            turns_limit: template.turns_limit,
            description: template.description.clone(),
        }
    }
}

/// A one-shot notification invoked with the goal snapshot after its
/// transition.
pub type GoalCallback = Box<dyn FnOnce(&Goal) -> Result<(), CallbackError>>;

/// Optional success and failure callbacks for a single goal.
///
/// At most one of the two ever runs, and only once.
#[derive(Default)]
pub struct GoalCallbacks {
    on_success: Option<GoalCallback>,
    on_failure: Option<GoalCallback>,
}

impl GoalCallbacks {
    /// No callbacks.
    pub const fn none() -> Self {
        Self {
            on_success: None,
            on_failure: None,
        }
    }

    /// Set the callback run when the goal completes.
    #[must_use]
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Goal) -> Result<(), CallbackError> + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Set the callback run when the goal fails.
    #[must_use]
    pub fn on_failure<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Goal) -> Result<(), CallbackError> + 'static,
    {
        self.on_failure = Some(Box::new(callback));
        self
    }

    /// Whether neither callback is set.
    pub const fn is_empty(&self) -> bool {
        self.on_success.is_none() && self.on_failure.is_none()
    }

    /// Run the callback matching `outcome`, dropping the other.
    fn invoke(self, outcome: GoalOutcome, goal: &Goal) -> Result<(), CallbackError> {
        let callback = match outcome {
            GoalOutcome::Completed => self.on_success,
            GoalOutcome::Failed => self.on_failure,
        };
        callback.map_or(Ok(()), |callback| callback(goal))
    }
}

impl core::fmt::Debug for GoalCallbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GoalCallbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// GoalRegistry
// ---------------------------------------------------------------------------

/// Owns every goal, partitioned by lifecycle state.
#[derive(Debug, Default)]
pub struct GoalRegistry {
    /// Goals still being tracked, in creation order.
    active: Vec<Goal>,
    /// Goals that reached their target, in transition order.
    completed: Vec<Goal>,
    /// Goals that ran out of turns, in transition order.
    failed: Vec<Goal>,
    /// Pending callbacks for active goals. Removed on transition.
    callbacks: BTreeMap<GoalId, GoalCallbacks>,
    /// Reject non-positive targets and turn budgets on creation.
    strict_validation: bool,
}

impl GoalRegistry {
    /// Create an empty, permissive registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry, optionally rejecting non-positive input.
    pub fn with_validation(strict_validation: bool) -> Self {
        Self {
            strict_validation,
            ..Self::default()
        }
    }

    /// Create a new active goal and append it to the active partition.
    ///
    /// In permissive mode (the default) any input is accepted: a goal with
    /// a non-positive turn budget simply fails on its first evaluation, and
    /// a non-positive target completes on its first evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::InvalidGoal`] in strict mode if `turns_limit`
    /// or `target_amount` is not positive.
    pub fn create_goal(
        &mut self,
        new_goal: NewGoal,
        start_turn: u64,
        callbacks: GoalCallbacks,
    ) -> Result<Goal, GoalError> {
        if self.strict_validation {
            validate(&new_goal)?;
        }

        let goal = Goal {
            id: GoalId::new(),
            resource_key: new_goal.resource_key,
            target_amount: new_goal.target_amount,
            turns_limit: new_goal.turns_limit,
            turns_remaining: new_goal.turns_limit,
            description: new_goal.description,
            status: GoalStatus::Active,
            start_turn,
            resolved_turn: None,
            created_at: Utc::now(),
        };

        info!(
            goal_id = %goal.id,
            resource = %goal.resource_key,
            target = %goal.target_amount,
            turns_limit = goal.turns_limit,
            start_turn,
            "Goal created"
        );

        if !callbacks.is_empty() {
            self.callbacks.insert(goal.id, callbacks);
        }
        self.active.push(goal.clone());
        Ok(goal)
    }

    /// Decrement `turns_remaining` on every active goal by one.
    ///
    /// Returns the number of goals counted down. Only the turn advance
    /// calls this, so deadlines never move without the clock.
    pub(crate) fn count_down(&mut self) -> usize {
        for goal in &mut self.active {
            goal.turns_remaining = goal.turns_remaining.saturating_sub(1);
        }
        self.active.len()
    }

    /// Evaluate every active goal against current production.
    ///
    /// Returns the transitions applied in this pass, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::Callback`] if a callback fails. See the module
    /// documentation for what stays applied.
    pub fn evaluate(
        &mut self,
        provider: &dyn ResourceProvider,
        turn: u64,
    ) -> Result<Vec<GoalTransition>, GoalError> {
        let mut transitions = Vec::new();
        let mut index: usize = 0;

        // A resolved goal leaves `active` before its callback runs.
        while let Some(goal) = self.active.get(index) {
            let production = provider
                .production_of(&goal.resource_key)
                .unwrap_or(Decimal::ZERO);

            let Some(outcome) = decide(goal, production) else {
                debug!(
                    goal_id = %goal.id,
                    production = %production,
                    target = %goal.target_amount,
                    turns_remaining = goal.turns_remaining,
                    "Goal still active"
                );
                index = index.saturating_add(1);
                continue;
            };

            let mut goal = self.active.remove(index);
            goal.status = outcome.status();
            goal.resolved_turn = Some(turn);
            info!(
                goal_id = %goal.id,
                %outcome,
                production = %production,
                target = %goal.target_amount,
                turn,
                "Goal resolved"
            );

            let callbacks = self.callbacks.remove(&goal.id);
            let transition = GoalTransition {
                goal: goal.clone(),
                outcome,
                turn,
            };
            match outcome {
                GoalOutcome::Completed => self.completed.push(goal),
                GoalOutcome::Failed => self.failed.push(goal),
            }

            let result = callbacks.map_or(Ok(()), |callbacks| {
                callbacks.invoke(outcome, &transition.goal)
            });
            if let Err(source) = result {
                warn!(
                    goal_id = %transition.goal.id,
                    %outcome,
                    error = %source,
                    "Goal callback failed, aborting evaluation pass"
                );
                return Err(GoalError::Callback {
                    goal_id: transition.goal.id,
                    outcome,
                    source,
                });
            }

            transitions.push(transition);
        }

        Ok(transitions)
    }

    /// Goals still being tracked, in creation order.
    pub fn active(&self) -> &[Goal] {
        &self.active
    }

    /// Goals that reached their target, in transition order.
    pub fn completed(&self) -> &[Goal] {
        &self.completed
    }

    /// Goals that ran out of turns, in transition order.
    pub fn failed(&self) -> &[Goal] {
        &self.failed
    }

    /// Look up a goal in any partition.
    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.active
            .iter()
            .chain(&self.completed)
            .chain(&self.failed)
            .find(|goal| goal.id == id)
    }

    /// Number of goals in each partition.
    pub fn counts(&self) -> GoalCounts {
        GoalCounts {
            active: u32::try_from(self.active.len()).unwrap_or(u32::MAX),
            completed: u32::try_from(self.completed.len()).unwrap_or(u32::MAX),
            failed: u32::try_from(self.failed.len()).unwrap_or(u32::MAX),
        }
    }

    /// Empty all three partitions. Pending callbacks are dropped unrun.
    pub fn clear_all(&mut self) {
        let counts = self.counts();
        self.active.clear();
        self.completed.clear();
        self.failed.clear();
        self.callbacks.clear();
        info!(
            active = counts.active,
            completed = counts.completed,
            failed = counts.failed,
            "All goals cleared"
        );
    }
}

/// Apply the transition rule to a single goal.
fn decide(goal: &Goal, production: Decimal) -> Option<GoalOutcome> {
    if production >= goal.target_amount {
        Some(GoalOutcome::Completed)
    } else if goal.turns_remaining <= 0 {
        Some(GoalOutcome::Failed)
    } else {
        None
    }
}

/// Reject non-positive targets and turn budgets.
fn validate(new_goal: &NewGoal) -> Result<(), GoalError> {
    if new_goal.turns_limit <= 0 {
        return Err(GoalError::InvalidGoal {
            reason: format!("turns_limit must be positive, got {}", new_goal.turns_limit),
        });
    }
    if new_goal.target_amount <= Decimal::ZERO {
        return Err(GoalError::InvalidGoal {
            reason: format!(
                "target_amount must be positive, got {}",
                new_goal.target_amount
            ),
        });
    }
    Ok(())
}
