use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An attacking move. Immutable once it has been handed to a combatant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Move {
    pub name: String,
    pub power: u16,
    pub element: ElementType,
}

impl Move {
    pub fn new(name: impl Into<String>, power: u16, element: ElementType) -> Self {
        Self {
            name: name.into(),
            power,
            element,
        }
    }

    /// Only moves that deal damage may sit in a battle roster.
    pub fn is_usable(&self) -> bool {
        self.power > 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, power {})", self.name, self.element, self.power)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BattleMode {
    /// One combatant each, one battle.
    Single,
    /// One combatant against a fixed number of successive challengers.
    League,
    /// Full teams on both sides.
    Team,
}

impl BattleMode {
    pub fn is_league(&self) -> bool {
        matches!(self, BattleMode::League)
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            BattleMode::Single => "Single",
            BattleMode::League => "League",
            BattleMode::Team => "Team",
        };
        write!(f, "{}", display_name)
    }
}

impl std::str::FromStr for BattleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(BattleMode::Single),
            "league" => Ok(BattleMode::League),
            "team" => Ok(BattleMode::Team),
            other => Err(format!("unknown battle mode '{}'", other)),
        }
    }
}
