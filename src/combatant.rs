use crate::config::MAX_ROSTER_SIZE;
use schema::{BaseStats, CreatureId, ElementType, Move};
use serde::{Deserialize, Serialize};

/// A creature taking part in a battle, with its mutable HP and faint state.
///
/// HP and the faint flag only change through [`Combatant::take_damage`] and
/// [`Combatant::restore`], which keep `fainted == (current_hp == 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CreatureId,
    pub name: String,
    types: Vec<ElementType>,
    stats: BaseStats,
    max_hp: u16,
    current_hp: u16,
    moves: Vec<Move>,
    fainted: bool,
}

impl Combatant {
    /// Create a combatant at full HP.
    ///
    /// Only the first two types are kept. The roster keeps moves with positive
    /// power, drops repeated names and is capped at six entries; it may end up
    /// empty, which the engine reports before a battle starts.
    pub fn new(
        id: CreatureId,
        name: impl Into<String>,
        types: Vec<ElementType>,
        stats: BaseStats,
        moves: Vec<Move>,
    ) -> Self {
        let max_hp = stats.max_hp().max(1);
        Combatant {
            id,
            name: name.into(),
            types: types.into_iter().take(2).collect(),
            stats,
            max_hp,
            current_hp: max_hp,
            moves: Self::usable_roster(moves),
            fainted: false,
        }
    }

    fn usable_roster(moves: Vec<Move>) -> Vec<Move> {
        let mut roster: Vec<Move> = Vec::new();
        for move_ in moves.into_iter().filter(Move::is_usable) {
            if roster.len() >= MAX_ROSTER_SIZE {
                break;
            }
            if !roster.iter().any(|known| known.name == move_.name) {
                roster.push(move_);
            }
        }
        roster
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    pub fn attack(&self) -> u16 {
        self.stats.attack
    }

    pub fn defense(&self) -> u16 {
        self.stats.defense
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    /// Current HP as a fraction of max HP.
    pub fn hp_fraction(&self) -> f64 {
        self.current_hp as f64 / self.max_hp as f64
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn find_move(&self, name: &str) -> Option<&Move> {
        self.moves.iter().find(|move_| move_.name == name)
    }

    pub fn has_usable_moves(&self) -> bool {
        !self.moves.is_empty()
    }

    pub fn is_fainted(&self) -> bool {
        self.fainted
    }

    /// Apply damage, clamping HP at zero.
    /// Returns true if this hit made the combatant faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        if self.fainted {
            return false;
        }
        self.current_hp = self.current_hp.saturating_sub(damage);
        if self.current_hp == 0 {
            self.fainted = true;
            return true;
        }
        false
    }

    /// Full heal, clearing the faint flag.
    pub fn restore(&mut self) {
        self.current_hp = self.max_hp;
        self.fainted = false;
    }

    /// Swap in a fresh move roster. An empty replacement keeps the old roster,
    /// so a combatant never loses its last usable move mid-league.
    /// Returns true if the roster changed.
    pub fn replace_moves(&mut self, moves: Vec<Move>) -> bool {
        let roster = Self::usable_roster(moves);
        if roster.is_empty() {
            return false;
        }
        self.moves = roster;
        true
    }
}
