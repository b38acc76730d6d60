//! Shared type definitions for the Goalpost production goal engine.
//!
//! Types defined here are consumed by the engine and by whatever
//! presentation layer renders goal lists. They flow to `TypeScript` via
//! `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- UUID-backed goal identifiers and resource keys
//! - [`enums`] -- Goal status and transition outcome
//! - [`structs`] -- Goals, templates, transition events, partition counts

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{GoalOutcome, GoalStatus};
pub use ids::{GoalId, ResourceKey};
pub use structs::{Goal, GoalCounts, GoalTemplate, GoalTransition};
