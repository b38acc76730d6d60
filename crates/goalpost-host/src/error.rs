//! Error types for the host binary.
//!
//! [`HostError`] wraps every failure mode during startup and the campaign
//! loop so that `main` can propagate with `?`.

use goalpost_types::ResourceKey;

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Engine configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: goalpost_core::ConfigError,
    },

    /// The `host` section of the configuration is malformed.
    #[error("host config error: {message}")]
    HostConfig {
        /// Description of the problem.
        message: String,
    },

    /// A goal could not be created.
    #[error("goal error: {source}")]
    Goal {
        /// The underlying goal error.
        #[from]
        source: goalpost_core::GoalError,
    },

    /// A turn advance failed.
    #[error("turn error: {source}")]
    Turn {
        /// The underlying turn error.
        #[from]
        source: goalpost_core::TurnError,
    },

    /// A scripted production rate overflowed.
    #[error("production overflow for resource {resource}")]
    ProductionOverflow {
        /// The resource whose rate overflowed.
        resource: ResourceKey,
    },

    /// `commit_turn` was called without a preceding `simulate_turn`.
    #[error("commit_turn called before simulate_turn")]
    NothingToCommit,
}
