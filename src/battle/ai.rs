//! A module for defining AI behaviors for battle opponents.

use crate::battle::rng::RandomSource;
use crate::battle::stats::matchup_score;
use crate::combatant::Combatant;
use crate::team::Team;
use ordered_float::OrderedFloat;
use schema::{BattleMode, Move};

/// What the opponent does with its turn.
#[derive(Debug, Clone, PartialEq)]
pub enum BotAction {
    Attack(Move),
    Switch(usize),
}

/// A trait for any system that can decide on a battle action.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior {
    /// Decide the opponent's action for this turn.
    fn choose_action(
        &self,
        bot_team: &Team,
        player_active: &Combatant,
        mode: BattleMode,
        rng: &mut dyn RandomSource,
    ) -> BotAction;

    /// Pick the combatant sent in after the active one faints.
    fn choose_replacement(&self, bot_team: &Team, player_active: &Combatant) -> Option<usize>;
}

/// Attacks at random, and in team mode retreats a badly hurt combatant in
/// favour of the team member with the best type matchup.
pub struct MatchupAI {
    switch_threshold: f64,
}

impl MatchupAI {
    pub fn new(switch_threshold: f64) -> Self {
        Self { switch_threshold }
    }

    fn random_move(&self, active: &Combatant, rng: &mut dyn RandomSource) -> Option<Move> {
        let moves = active.moves();
        if moves.is_empty() {
            return None;
        }
        let index = rng.next_index(moves.len(), "bot move");
        Some(moves[index].clone())
    }

    /// Index of the healthy team member with the strictly highest matchup score
    /// against `player_active`; on ties the earliest member wins.
    pub fn best_matchup(&self, bot_team: &Team, player_active: &Combatant) -> Option<usize> {
        bot_team
            .members()
            .iter()
            .enumerate()
            .filter(|(_, member)| !member.is_fainted())
            .map(|(index, member)| {
                let score = matchup_score(member.types(), player_active.types());
                (index, OrderedFloat(score))
            })
            .max_by(|(a_index, a_score), (b_index, b_score)| {
                a_score.cmp(b_score).then(b_index.cmp(a_index))
            })
            .map(|(index, _)| index)
    }
}

impl Default for MatchupAI {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl Behavior for MatchupAI {
    fn choose_action(
        &self,
        bot_team: &Team,
        player_active: &Combatant,
        mode: BattleMode,
        rng: &mut dyn RandomSource,
    ) -> BotAction {
        let active_index = bot_team.active_index();

        if mode == BattleMode::Team {
            if let Some(active) = bot_team.active() {
                if active.hp_fraction() < self.switch_threshold {
                    if let Some(best) = self.best_matchup(bot_team, player_active) {
                        if best != active_index {
                            return BotAction::Switch(best);
                        }
                    }
                }
            }
        }

        match bot_team.active().and_then(|active| self.random_move(active, rng)) {
            Some(move_) => BotAction::Attack(move_),
            // Rosters are validated before a battle starts, so a team always has
            // something to attack with; fall back to any healthy bench member.
            None => BotAction::Switch(
                bot_team
                    .valid_switches()
                    .first()
                    .copied()
                    .unwrap_or(active_index),
            ),
        }
    }

    fn choose_replacement(&self, bot_team: &Team, _player_active: &Combatant) -> Option<usize> {
        bot_team.first_healthy_index()
    }
}
