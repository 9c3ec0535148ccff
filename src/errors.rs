use crate::battle::state::Side;
use schema::{BattleMode, CreatureId};
use std::fmt;

/// Main error type for the creature arena battle engine
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEngineError {
    /// A submitted action was rejected; the battle state is untouched
    InvalidAction(ActionError),
    /// A team could not take part in a battle
    DataIncomplete(DataError),
    /// The creature catalog could not supply a combatant or move list
    Catalog(CatalogError),
    /// Engine configuration could not be loaded
    Config(ConfigError),
}

/// Reasons a player action is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The battle has already ended
    BattleOver,
    /// Another action is still being resolved
    Resolving,
    /// The active combatant fainted and must be replaced before attacking
    ReplacementRequired,
    /// The active combatant does not know the named move
    MoveNotOwned(String),
    /// Team index is out of bounds
    InvalidTeamIndex(usize),
    /// The combatant at this index is already in play
    AlreadyActive(usize),
    /// The combatant at this index has fainted
    CombatantFainted(usize),
    /// Rematches are not offered in this mode
    RematchUnavailable(BattleMode),
}

/// Problems with the teams handed to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A combatant has no move with positive power
    NoUsableMoves(String),
    /// A side has no combatants at all
    EmptyTeam(Side),
    /// Team length does not match what the mode requires
    TeamSizeMismatch { expected: usize, actual: usize },
    /// Every combatant on a side has already fainted
    NoHealthyCombatant(Side),
    /// The category holds no opponents once the player's picks are removed
    EmptyOpponentPool(String),
}

/// Errors raised by a creature catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No species with this id exists in the catalog
    CreatureNotFound(CreatureId),
    /// The category name is not known
    UnknownCategory(String),
    /// A type name in the catalog could not be parsed
    UnknownType(String),
    /// A required stat is absent from a species record
    MissingStat { creature: CreatureId, stat: &'static str },
    /// The catalog document itself is malformed
    Malformed(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::InvalidAction(err) => write!(f, "Invalid action: {}", err),
            BattleEngineError::DataIncomplete(err) => write!(f, "Incomplete battle data: {}", err),
            BattleEngineError::Catalog(err) => write!(f, "Catalog error: {}", err),
            BattleEngineError::Config(err) => write!(f, "Config error: {}", err),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::BattleOver => write!(f, "the battle is over"),
            ActionError::Resolving => write!(f, "an action is still resolving"),
            ActionError::ReplacementRequired => {
                write!(f, "the active combatant fainted and must be replaced")
            }
            ActionError::MoveNotOwned(name) => write!(f, "active combatant does not know {}", name),
            ActionError::InvalidTeamIndex(index) => write!(f, "invalid team index: {}", index),
            ActionError::AlreadyActive(index) => {
                write!(f, "combatant {} is already in play", index)
            }
            ActionError::CombatantFainted(index) => write!(f, "combatant {} has fainted", index),
            ActionError::RematchUnavailable(mode) => {
                write!(f, "rematch is not available in {} mode", mode)
            }
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::NoUsableMoves(name) => write!(f, "{} has no usable moves", name),
            DataError::EmptyTeam(side) => write!(f, "{} team is empty", side),
            DataError::TeamSizeMismatch { expected, actual } => write!(
                f,
                "team must hold {} combatants, got {}",
                expected, actual
            ),
            DataError::NoHealthyCombatant(side) => {
                write!(f, "{} team has no combatant able to fight", side)
            }
            DataError::EmptyOpponentPool(category) => {
                write!(f, "no opponents left in category '{}'", category)
            }
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::CreatureNotFound(id) => write!(f, "Creature not found: {}", id),
            CatalogError::UnknownCategory(name) => write!(f, "Unknown category: {}", name),
            CatalogError::UnknownType(name) => write!(f, "Unknown type: {}", name),
            CatalogError::MissingStat { creature, stat } => {
                write!(f, "Creature {} is missing the {} stat", creature, stat)
            }
            CatalogError::Malformed(details) => write!(f, "Malformed catalog: {}", details),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(details) => write!(f, "could not read config: {}", details),
            ConfigError::Parse(details) => write!(f, "could not parse config: {}", details),
            ConfigError::Invalid(details) => write!(f, "invalid config: {}", details),
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for ActionError {}
impl std::error::Error for DataError {}
impl std::error::Error for CatalogError {}
impl std::error::Error for ConfigError {}

impl From<ActionError> for BattleEngineError {
    fn from(err: ActionError) -> Self {
        BattleEngineError::InvalidAction(err)
    }
}

impl From<DataError> for BattleEngineError {
    fn from(err: DataError) -> Self {
        BattleEngineError::DataIncomplete(err)
    }
}

impl From<CatalogError> for BattleEngineError {
    fn from(err: CatalogError) -> Self {
        BattleEngineError::Catalog(err)
    }
}

impl From<ConfigError> for BattleEngineError {
    fn from(err: ConfigError) -> Self {
        BattleEngineError::Config(err)
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
