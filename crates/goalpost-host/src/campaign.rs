//! Campaign loop: accept goals, then play turns until they all resolve.
//!
//! One logical turn is `simulate_turn`, `commit_turn`, then
//! [`GoalEngine::advance`]. The loop stops after `max_turns` turns or as
//! soon as no goal is left active.

use std::collections::BTreeMap;

use goalpost_core::{GoalCallbacks, GoalEngine};
use goalpost_types::{GoalCounts, ResourceKey};
use serde::Deserialize;
use tracing::{info, warn};

use crate::economy::{ResourceScript, TurnHooks};
use crate::error::HostError;
use crate::notify;

/// Default turn limit for one host run.
const DEFAULT_MAX_TURNS: u64 = 10;

/// The `host` section of `goalpost-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Stop after this many turns even if goals are still active.
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,

    /// Template names to accept before the first turn.
    #[serde(default = "default_goals")]
    pub goals: Vec<String>,

    /// Scripted production per resource.
    #[serde(default)]
    pub economy: BTreeMap<ResourceKey, ResourceScript>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            goals: default_goals(),
            economy: BTreeMap::new(),
        }
    }
}

const fn default_max_turns() -> u64 {
    DEFAULT_MAX_TURNS
}

fn default_goals() -> Vec<String> {
    vec!["creditProduction".to_owned()]
}

/// Outcome of a host run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignReport {
    /// Turns played.
    pub turns_played: u64,
    /// Final turn number.
    pub final_turn: u64,
    /// Partition sizes at the end of the run.
    pub counts: GoalCounts,
}

/// Accept every configured goal template on `engine`.
pub fn accept_goals(engine: &mut GoalEngine, names: &[String]) -> Result<(), HostError> {
    for name in names {
        let callbacks = GoalCallbacks::none()
            .on_success(notify::goal_achieved)
            .on_failure(notify::goal_failed);
        engine.accept_template(name, callbacks)?;
    }
    Ok(())
}

/// Play turns until every goal has resolved or `max_turns` is reached.
pub fn run_campaign(
    engine: &mut GoalEngine,
    hooks: &mut dyn TurnHooks,
    max_turns: u64,
) -> Result<CampaignReport, HostError> {
    let mut turns_played: u64 = 0;

    while turns_played < max_turns && !engine.registry().active().is_empty() {
        hooks.simulate_turn()?;
        hooks.commit_turn()?;
        let summary = engine.advance(hooks.production())?;
        turns_played = turns_played.saturating_add(1);

        for goal in engine.registry().active() {
            info!(
                goal = goal.description,
                turns_elapsed = goal.turns_elapsed(),
                turns_remaining = goal.turns_remaining,
                "Goal in progress"
            );
        }
        if summary.counts.active == 0 {
            info!(turn = summary.turn, "All goals resolved");
        }
    }

    let counts = engine.counts();
    if counts.active > 0 {
        warn!(
            active = counts.active,
            max_turns, "Turn limit reached with goals still active"
        );
    }

    Ok(CampaignReport {
        turns_played,
        final_turn: engine.current_turn(),
        counts,
    })
}
