//! Host-owned goal engine.
//!
//! A [`GoalEngine`] bundles one turn clock, one goal registry and the
//! template catalog for a single campaign. Hosts construct as many as they
//! need and pass them around by reference; there is no process-wide state.

use goalpost_types::{Goal, GoalCounts};
use tracing::info;

use crate::catalog::GoalTemplateCatalog;
use crate::clock::{ClockError, TurnClock};
use crate::config::EngineConfig;
use crate::registry::{GoalCallbacks, GoalError, GoalRegistry, NewGoal};
use crate::resource::ResourceProvider;
use crate::turn::{self, TurnError, TurnSummary};

/// Goal tracking state for one campaign.
#[derive(Debug)]
pub struct GoalEngine {
    clock: TurnClock,
    registry: GoalRegistry,
    catalog: GoalTemplateCatalog,
}

impl GoalEngine {
    /// Create an engine from configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            clock: TurnClock::new(config.campaign.starting_turn),
            registry: GoalRegistry::with_validation(config.campaign.strict_validation),
            catalog: config.catalog(),
        }
    }

    /// Create an engine from explicit parts.
    pub const fn from_parts(
        clock: TurnClock,
        registry: GoalRegistry,
        catalog: GoalTemplateCatalog,
    ) -> Self {
        Self {
            clock,
            registry,
            catalog,
        }
    }

    /// Create a goal that starts on the current turn.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::InvalidGoal`] if strict validation is enabled
    /// and the input is not positive.
    pub fn create_goal(
        &mut self,
        new_goal: NewGoal,
        callbacks: GoalCallbacks,
    ) -> Result<Goal, GoalError> {
        self.registry
            .create_goal(new_goal, self.clock.current(), callbacks)
    }

    /// Create a goal from a named catalog template.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::UnknownTemplate`] if no template has that name.
    pub fn accept_template(
        &mut self,
        name: &str,
        callbacks: GoalCallbacks,
    ) -> Result<Goal, GoalError> {
        let template = self
            .catalog
            .get(name)
            .ok_or_else(|| GoalError::UnknownTemplate {
                name: name.to_owned(),
            })?;
        let new_goal = NewGoal::from(template);
        let goal = self.create_goal(new_goal, callbacks)?;
        info!(template = name, goal_id = %goal.id, "Goal accepted: {}", goal.description);
        Ok(goal)
    }

    /// Advance one turn. Call after the host has committed this turn's
    /// production into `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError`] on clock overflow or callback failure.
    pub fn advance(&mut self, provider: &dyn ResourceProvider) -> Result<TurnSummary, TurnError> {
        turn::advance_turn(&mut self.clock, &mut self.registry, provider)
    }

    /// Current turn number.
    pub const fn current_turn(&self) -> u64 {
        self.clock.current()
    }

    /// Move the turn counter forward to `turn` (for loading a campaign).
    /// Goals are not affected.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Rewind`] if `turn` is behind the current turn.
    /// Use [`new_campaign`](Self::new_campaign) to start over instead.
    pub fn restore_turn(&mut self, turn: u64) -> Result<(), ClockError> {
        let from = self.clock.current();
        self.clock.set_turn(turn)?;
        info!(from, to = turn, "Turn counter restored");
        Ok(())
    }

    /// Start over: empty every partition and reset the clock.
    pub fn new_campaign(&mut self) {
        self.registry.clear_all();
        self.clock.reset();
        info!(turn = self.clock.current(), "New campaign started");
    }

    /// Empty every goal partition without touching the clock.
    pub fn clear_all(&mut self) {
        self.registry.clear_all();
    }

    /// Partition sizes.
    pub fn counts(&self) -> GoalCounts {
        self.registry.counts()
    }

    /// Read access to the goal partitions.
    pub const fn registry(&self) -> &GoalRegistry {
        &self.registry
    }

    /// The template catalog.
    pub const fn catalog(&self) -> &GoalTemplateCatalog {
        &self.catalog
    }
}

impl Default for GoalEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
