//! Engine tuning loaded from a RON file.
//!
//! Every field has a default, so a config file only needs to name the values
//! it wants to change:
//!
//! ```ron
//! (league_challenges: 3, pacing: (attack_ms: 0))
//! ```

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_ROSTER_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of challengers to beat in league mode.
    pub league_challenges: u32,
    /// Team length in team mode.
    pub team_size: usize,
    /// Maximum number of moves a combatant carries into battle.
    pub moves_per_combatant: usize,
    /// HP fraction under which the opponent considers a defensive switch.
    pub switch_threshold: f64,
    pub pacing: PacingConfig,
}

/// Delays a renderer waits after certain events, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub attack_ms: u64,
    pub turn_handoff_ms: u64,
    pub faint_ms: u64,
    pub league_transition_ms: u64,
    pub restart_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            league_challenges: 5,
            team_size: 5,
            moves_per_combatant: 6,
            switch_threshold: 0.25,
            pacing: PacingConfig::default(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            attack_ms: 500,
            turn_handoff_ms: 1500,
            faint_ms: 1000,
            league_transition_ms: 3000,
            restart_ms: 500,
        }
    }
}

impl PacingConfig {
    /// Pacing with every delay set to zero, for tests and headless runs.
    pub fn instant() -> Self {
        Self {
            attack_ms: 0,
            turn_handoff_ms: 0,
            faint_ms: 0,
            league_transition_ms: 0,
            restart_ms: 0,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig =
            ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.league_challenges == 0 {
            return Err(ConfigError::Invalid(
                "league_challenges must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_TEAM_SIZE).contains(&self.team_size) {
            return Err(ConfigError::Invalid(format!(
                "team_size must be between 1 and {}",
                MAX_TEAM_SIZE
            )));
        }
        if !(1..=MAX_ROSTER_SIZE).contains(&self.moves_per_combatant) {
            return Err(ConfigError::Invalid(format!(
                "moves_per_combatant must be between 1 and {}",
                MAX_ROSTER_SIZE
            )));
        }
        if !(0.0..=1.0).contains(&self.switch_threshold) {
            return Err(ConfigError::Invalid(
                "switch_threshold must lie in 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }
}
