use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Catalog identifier of a creature species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub u16);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    /// Battle HP derived from the base HP stat.
    pub fn max_hp(&self) -> u16 {
        self.hp.saturating_mul(3).saturating_add(50)
    }
}

// Raw catalog shapes. These mirror the loosely typed payloads of a creature
// catalog and are only ever turned into battle values by the catalog loader.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStat {
    pub name: String,
    pub value: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMove {
    pub name: String,
    #[serde(default)]
    pub power: Option<u16>,
    #[serde(rename = "type")]
    pub move_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: CreatureId,
    pub name: String,
    pub types: Vec<String>,
    pub stats: Vec<RawStat>,
    pub moves: Vec<RawMove>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub categories: HashMap<String, Vec<CreatureId>>,
    pub species: Vec<SpeciesRecord>,
}
