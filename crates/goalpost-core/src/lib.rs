//! Production goal tracking for a turn-based economic simulation.
//!
//! Players set goals of the form "reach N units of resource X per turn
//! within T turns". Each confirmed turn the host commits its economy's
//! production, then advances the engine; goals that hit their target
//! complete and goals that run out of turns fail.
//!
//! # Modules
//!
//! - [`catalog`] -- Named goal presets.
//! - [`clock`] -- The single authoritative turn counter.
//! - [`config`] -- Configuration loading from `goalpost-config.yaml`.
//! - [`engine`] -- [`GoalEngine`], the host-owned bundle of clock, registry
//!   and catalog.
//! - [`registry`] -- Goal partitions and the transition rule.
//! - [`resource`] -- [`ResourceProvider`] and an in-memory production table.
//! - [`turn`] -- The turn advance sequence.
//!
//! [`GoalEngine`]: engine::GoalEngine
//! [`ResourceProvider`]: resource::ResourceProvider

pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod registry;
pub mod resource;
pub mod turn;

pub use catalog::GoalTemplateCatalog;
pub use clock::{ClockError, TurnClock};
pub use config::{ConfigError, EngineConfig};
pub use engine::GoalEngine;
pub use registry::{CallbackError, GoalCallback, GoalCallbacks, GoalError, GoalRegistry, NewGoal};
pub use resource::{ProductionRecord, ProductionTable, ResourceProvider};
pub use turn::{TurnError, TurnSummary};
