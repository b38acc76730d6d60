//! Headless host for the Goalpost engine.
//!
//! Plays the role of the game client: it owns the (scripted) economy,
//! accepts goals from the template catalog, and drives turns through the
//! host contract -- simulate, commit, then advance the engine.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `goalpost-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Create the goal engine
//! 4. Build the scripted economy from the `host` section
//! 5. Accept the configured goals
//! 6. Run the campaign loop
//! 7. Log the result

mod campaign;
mod economy;
mod error;
mod notify;

use std::path::{Path, PathBuf};

use goalpost_core::config::LogFormat;
use goalpost_core::{EngineConfig, GoalEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::campaign::HostConfig;
use crate::economy::ScriptedEconomy;
use crate::error::HostError;

/// Default configuration file name.
const DEFAULT_CONFIG_PATH: &str = "goalpost-config.yaml";

/// Application entry point for the host.
///
/// # Errors
///
/// Returns an error if configuration, goal setup, or a turn fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = EngineConfig::load_or_default(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!(
        config_path = %config_path.display(),
        starting_turn = config.campaign.starting_turn,
        strict_validation = config.campaign.strict_validation,
        "goalpost-host starting"
    );

    // 3. Create the goal engine.
    let mut engine = GoalEngine::new(&config);
    info!(
        templates = engine.catalog().len(),
        turn = engine.current_turn(),
        "Goal engine initialized"
    );

    // 4. Build the scripted economy.
    let host_config = load_host_config(&config_path)?;
    let mut economy = ScriptedEconomy::new(host_config.economy.clone());
    info!(
        resources = economy.table().len(),
        max_turns = host_config.max_turns,
        "Scripted economy ready"
    );

    // 5. Accept goals.
    campaign::accept_goals(&mut engine, &host_config.goals)?;

    // 6. Run the campaign.
    let report = campaign::run_campaign(&mut engine, &mut economy, host_config.max_turns)?;

    // 7. Log the result.
    info!(
        turns_played = report.turns_played,
        final_turn = report.final_turn,
        completed = report.counts.completed,
        failed = report.counts.failed,
        active = report.counts.active,
        "Campaign finished"
    );

    Ok(())
}

/// Initialize the tracing subscriber from the logging config.
///
/// `RUST_LOG` takes precedence over `logging.level` (and `GOALPOST_LOG`)
/// when set.
fn init_logging(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Load the `host` section of the configuration file.
///
/// If the file does not exist or lacks the `host` key, defaults are used.
fn load_host_config(path: &Path) -> Result<HostConfig, HostError> {
    if !path.exists() {
        info!("Config file not found, using default host settings");
        return Ok(HostConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| HostError::HostConfig {
        message: format!("failed to read config file: {e}"),
    })?;

    // Parse the full YAML and extract just the "host" section.
    let raw: serde_yml::Value =
        serde_yml::from_str(&contents).map_err(|e| HostError::HostConfig {
            message: format!("failed to parse config YAML: {e}"),
        })?;

    match raw.get("host") {
        Some(host_value) => {
            serde_yml::from_value(host_value.clone()).map_err(|e| HostError::HostConfig {
                message: format!("invalid host section: {e}"),
            })
        }
        None => Ok(HostConfig::default()),
    }
}
