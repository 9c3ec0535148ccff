use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    /// Returns the chart entry for a single attacking/defending pair, or `None`
    /// when the chart has no entry for it (which counts as a neutral 1x hit).
    pub fn chart_entry(attacking: ElementType, defending: ElementType) -> Option<f64> {
        use ElementType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Rock) | (Normal, Steel) => Some(0.5),
            (Normal, Ghost) => Some(0.0),

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => Some(0.5),
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => Some(2.0),

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => Some(0.5),
            (Water, Fire) | (Water, Ground) | (Water, Rock) => Some(2.0),

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => Some(0.5),
            (Electric, Ground) => Some(0.0),
            (Electric, Water) | (Electric, Flying) => Some(2.0),

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon)
            | (Grass, Steel) => Some(0.5),
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => Some(2.0),

            // Ice
            (Ice, Water) | (Ice, Ice) | (Ice, Steel) | (Ice, Fire) => Some(0.5),
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => Some(2.0),

            // Fighting
            (Fighting, Poison)
            | (Fighting, Flying)
            | (Fighting, Psychic)
            | (Fighting, Bug)
            | (Fighting, Fairy) => Some(0.5),
            (Fighting, Ghost) => Some(0.0),
            (Fighting, Normal)
            | (Fighting, Ice)
            | (Fighting, Rock)
            | (Fighting, Dark)
            | (Fighting, Steel) => Some(2.0),

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => Some(0.5),
            (Poison, Steel) => Some(0.0),
            (Poison, Grass) | (Poison, Fairy) => Some(2.0),

            // Ground
            (Ground, Grass) | (Ground, Bug) => Some(0.5),
            (Ground, Flying) => Some(0.0),
            (Ground, Fire)
            | (Ground, Electric)
            | (Ground, Poison)
            | (Ground, Rock)
            | (Ground, Steel) => Some(2.0),

            // Flying
            (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => Some(0.5),
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => Some(2.0),

            // Psychic
            (Psychic, Psychic) => Some(0.5),
            (Psychic, Dark) => Some(0.0),
            (Psychic, Fighting) | (Psychic, Poison) => Some(2.0),

            // Bug
            (Bug, Fire)
            | (Bug, Fighting)
            | (Bug, Flying)
            | (Bug, Ghost)
            | (Bug, Steel)
            | (Bug, Fairy) => Some(0.5),
            (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => Some(2.0),

            // Rock
            (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => Some(0.5),
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => Some(2.0),

            // Ghost
            (Ghost, Normal) => Some(0.0),
            (Ghost, Dark) => Some(0.5),
            (Ghost, Psychic) | (Ghost, Ghost) => Some(2.0),

            // Dragon
            (Dragon, Steel) => Some(0.5),
            (Dragon, Fairy) => Some(0.0),
            (Dragon, Dragon) => Some(2.0),

            // Dark
            (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => Some(0.5),
            (Dark, Psychic) | (Dark, Ghost) => Some(2.0),

            // Steel
            (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => Some(0.5),
            (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => Some(2.0),

            // Fairy
            (Fairy, Poison) | (Fairy, Steel) | (Fairy, Bug) => Some(0.5),
            (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => Some(2.0),

            _ => None,
        }
    }

    /// Single-type multiplier for attacking vs defending.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: ElementType, defending: ElementType) -> f64 {
        Self::chart_entry(attacking, defending).unwrap_or(1.0)
    }
}
