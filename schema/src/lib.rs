// Creature Arena Schema - Shared type definitions
// This crate contains the static enums and data shapes shared between the
// battle engine and the catalog loader.

pub use battle_data::*;
pub use creature_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod creature_types;
pub mod species_data;
