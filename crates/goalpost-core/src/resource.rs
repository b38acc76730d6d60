//! Resource production lookup.
//!
//! The engine never computes production itself. The host's economy
//! commits its per-turn results into something implementing
//! [`ResourceProvider`], and the goal registry reads the `delta` of each
//! goal's resource during evaluation. A key the provider does not know is
//! treated as zero production.

use std::collections::BTreeMap;

use goalpost_types::ResourceKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only source of per-turn production rates.
///
/// Implementations must return the same values for the whole of one
/// evaluation pass.
pub trait ResourceProvider {
    /// Current per-turn production of `key`, or `None` if the resource is
    /// unknown.
    fn production_of(&self, key: &ResourceKey) -> Option<Decimal>;
}

/// Production record for a single resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRecord {
    /// Per-turn production rate.
    pub delta: Decimal,
}

impl ResourceProvider for BTreeMap<ResourceKey, ProductionRecord> {
    fn production_of(&self, key: &ResourceKey) -> Option<Decimal> {
        self.get(key).map(|record| record.delta)
    }
}

/// In-memory production table keyed by resource.
///
/// Hosts commit simulation results here once per turn; tests use it to
/// stage production directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductionTable {
    records: BTreeMap<ResourceKey, ProductionRecord>,
}

impl ProductionTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Set the production delta of a resource, inserting it if needed.
    pub fn set_delta(&mut self, key: impl Into<ResourceKey>, delta: Decimal) {
        self.records.insert(key.into(), ProductionRecord { delta });
    }

    /// Current delta of a resource, if present.
    pub fn delta(&self, key: &str) -> Option<Decimal> {
        self.records.get(key).map(|record| record.delta)
    }

    /// Remove a resource from the table.
    pub fn remove(&mut self, key: &str) -> Option<ProductionRecord> {
        self.records.remove(key)
    }

    /// Number of resources in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResourceProvider for ProductionTable {
    fn production_of(&self, key: &ResourceKey) -> Option<Decimal> {
        self.records.production_of(key)
    }
}

impl<K: Into<ResourceKey>> FromIterator<(K, Decimal)> for ProductionTable {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, delta) in iter {
            table.set_delta(key, delta);
        }
        table
    }
}
