//! Named goal presets offered to the player.
//!
//! The catalog is read-only once built. It either holds the three built-in
//! presets or whatever the `templates` section of the configuration
//! supplies.

use std::collections::BTreeMap;

use goalpost_types::{GoalTemplate, ResourceKey};
use rust_decimal::Decimal;

/// Name of the built-in credit production preset.
pub const CREDIT_PRODUCTION: &str = "creditProduction";

/// Name of the built-in common metal production preset.
pub const METAL_PRODUCTION: &str = "metalProduction";

/// Name of the built-in population growth preset.
pub const POPULATION_GROWTH: &str = "populationGrowth";

/// Static registry of named goal templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalTemplateCatalog {
    templates: BTreeMap<String, GoalTemplate>,
}

impl GoalTemplateCatalog {
    /// The built-in presets.
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            CREDIT_PRODUCTION.to_owned(),
            template(
                "credits",
                Decimal::from(100),
                5,
                "Reach 100 credits per turn production within 5 turns",
            ),
        );
        templates.insert(
            METAL_PRODUCTION.to_owned(),
            template(
                "commonMetal",
                Decimal::from(50),
                3,
                "Reach 50 common metal per turn production within 3 turns",
            ),
        );
        templates.insert(
            POPULATION_GROWTH.to_owned(),
            template(
                "pop",
                Decimal::from(20),
                4,
                "Reach 20 population growth per turn within 4 turns",
            ),
        );
        Self { templates }
    }

    /// Build a catalog from explicit templates (e.g. from configuration).
    pub const fn from_templates(templates: BTreeMap<String, GoalTemplate>) -> Self {
        Self { templates }
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&GoalTemplate> {
        self.templates.get(name)
    }

    /// Iterate over `(name, template)` pairs in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &GoalTemplate)> {
        self.templates
            .iter()
            .map(|(name, template)| (name.as_str(), template))
    }

    /// Template names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for GoalTemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn template(resource: &str, target: Decimal, turns: i64, description: &str) -> GoalTemplate {
    GoalTemplate {
        resource_key: ResourceKey::from(resource),
        target_amount: target,
        turns_limit: turns,
        description: description.to_owned(),
    }
}
