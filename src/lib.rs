// In: src/lib.rs

//! Creature Arena Battle Engine
//!
//! A turn-based creature battle engine: type-matchup damage, an opponent AI
//! that retreats hurt combatants, team battles with forced switches and a
//! league ladder of successive challengers. The engine emits events and a
//! separate renderer decides how to show them.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod catalog;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod pacing;
pub mod team;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `creature-arena` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
pub use schema::{BaseStats, BattleMode, CreatureId, ElementType, Move};

// --- From this crate's modules (`src/`) ---

// Core battle engine and state.
pub use battle::ai::{Behavior, BotAction, MatchupAI};
pub use battle::calculators::{calculate_damage, DamageOutcome};
pub use battle::engine::{BattleEngine, BattleSetup, OpponentTeam};
pub use battle::rng::{BattleRng, RandomSource};
pub use battle::state::{
    BattleEvent, BattleOutcome, BattleState, EventBus, LeagueProgress, Side, TurnPhase,
};
pub use battle::stats::{multiplier_for, EffectivenessTag};

// Runtime types for a battle.
pub use combatant::Combatant;
pub use team::Team;

// Catalog, configuration and pacing.
pub use catalog::{draw_team, CreatureCatalog, StaticCatalog};
pub use config::{EngineConfig, PacingConfig};
pub use pacing::EventScheduler;

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, CatalogError, CatalogResult, ConfigError,
    ConfigResult, DataError,
};
