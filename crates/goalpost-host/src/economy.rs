//! Scripted economy standing in for the real resource simulation.
//!
//! Each resource has a starting production delta and a fixed growth per
//! turn. `simulate_turn` computes next turn's deltas into a staging area;
//! `commit_turn` publishes them into the production table the goal engine
//! reads. Splitting the two mirrors the host contract: the engine must only
//! ever see committed production.

use std::collections::BTreeMap;

use goalpost_core::{ProductionTable, ResourceProvider};
use goalpost_types::ResourceKey;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::HostError;

/// The two host hooks that must run, in order, before the engine advances.
pub trait TurnHooks {
    /// Run the economic simulation for the upcoming turn.
    fn simulate_turn(&mut self) -> Result<(), HostError>;

    /// Commit the simulation results into the production lookup.
    fn commit_turn(&mut self) -> Result<(), HostError>;

    /// The production lookup the engine evaluates against.
    fn production(&self) -> &dyn ResourceProvider;
}

/// Script for a single resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceScript {
    /// Production delta before the first turn.
    #[serde(default)]
    pub delta: Decimal,

    /// Amount added to the delta every simulated turn.
    #[serde(default)]
    pub growth: Decimal,
}

/// Economy whose production changes by a fixed amount each turn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEconomy {
    scripts: BTreeMap<ResourceKey, ResourceScript>,
    staged: Option<BTreeMap<ResourceKey, Decimal>>,
    committed: ProductionTable,
}

impl ScriptedEconomy {
    /// Create an economy and commit the starting deltas.
    pub fn new(scripts: BTreeMap<ResourceKey, ResourceScript>) -> Self {
        let committed = scripts
            .iter()
            .map(|(key, script)| (key.clone(), script.delta))
            .collect();
        Self {
            scripts,
            staged: None,
            committed,
        }
    }

    /// The committed production table.
    pub const fn table(&self) -> &ProductionTable {
        &self.committed
    }
}

impl TurnHooks for ScriptedEconomy {
    fn simulate_turn(&mut self) -> Result<(), HostError> {
        let mut staged = BTreeMap::new();
        for (key, script) in &self.scripts {
            let current = self.committed.delta(key.as_str()).unwrap_or(script.delta);
            let next = current
                .checked_add(script.growth)
                .ok_or_else(|| HostError::ProductionOverflow {
                    resource: key.clone(),
                })?;
            staged.insert(key.clone(), next);
        }
        self.staged = Some(staged);
        Ok(())
    }

    fn commit_turn(&mut self) -> Result<(), HostError> {
        let staged = self.staged.take().ok_or(HostError::NothingToCommit)?;
        for (key, delta) in staged {
            debug!(resource = %key, delta = %delta, "Production committed");
            self.committed.set_delta(key, delta);
        }
        Ok(())
    }

    fn production(&self) -> &dyn ResourceProvider {
        &self.committed
    }
}
