//! League rounds: what happens between one challenger falling and the next
//! one stepping up.

use crate::battle::engine::BattleEngine;
use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleEvent, BattleOutcome, EventBus, LeagueProgress, Side, TurnPhase};
use crate::catalog::{draw_team, CreatureCatalog};
use crate::team::Team;

impl<C: CreatureCatalog, R: RandomSource> BattleEngine<C, R> {
    /// Record a win and either crown the champion or set up the next round.
    ///
    /// The next round heals the player's team, refreshes every roster and
    /// draws a single fresh challenger from the category.
    pub(super) fn advance_league(&mut self, bus: &mut EventBus) {
        let Some(progress) = self.state.league.as_mut() else {
            self.finish(BattleOutcome::PlayerWon, bus);
            return;
        };
        progress.wins += 1;
        let progress = *progress;
        tracing::info!(wins = progress.wins, total = progress.total, "league challenger defeated");

        if progress.is_complete() {
            self.crown_champion(progress, bus);
            return;
        }

        self.state.player.restore_all();
        bus.push(BattleEvent::TeamHealed { side: Side::Player });
        self.refresh_player_moves(bus);

        let pool = match self.catalog.category_pool(&self.state.category) {
            Ok(pool) => pool,
            Err(err) => {
                tracing::warn!(error = %err, "could not read the challenger pool");
                Vec::new()
            }
        };
        let player_ids = self.state.player.ids();
        let mut challengers = draw_team(&self.catalog, &pool, &player_ids, 1, &mut self.rng);

        let Some(challenger) = challengers.pop() else {
            tracing::warn!(
                category = %self.state.category,
                wins = progress.wins,
                "no challengers left, ending the league early"
            );
            self.finish(BattleOutcome::PlayerWon, bus);
            return;
        };

        let challenger_name = challenger.name.clone();
        self.state.bot = Team::new(vec![challenger]);
        self.state.phase = TurnPhase::AwaitingPlayer;
        tracing::info!(
            round = progress.current_round(),
            challenger = %challenger_name,
            "next league challenger"
        );
        bus.push(BattleEvent::LeagueAdvanced {
            progress,
            challenger: challenger_name,
        });
    }

    fn refresh_player_moves(&mut self, bus: &mut EventBus) {
        for member in self.state.player.members_mut() {
            let moves = match self.catalog.refresh_moves(member.id, &mut self.rng) {
                Ok(moves) => moves,
                Err(err) => {
                    tracing::warn!(combatant = %member.name, error = %err, "could not refresh moves");
                    continue;
                }
            };
            if member.replace_moves(moves) {
                bus.push(BattleEvent::MovesRefreshed {
                    side: Side::Player,
                    combatant: member.name.clone(),
                });
            } else {
                tracing::warn!(combatant = %member.name, "refresh gave no usable moves, keeping the old roster");
            }
        }
    }

    /// Only reached once every round is won.
    fn crown_champion(&mut self, progress: LeagueProgress, bus: &mut EventBus) {
        tracing::info!(category = %self.state.category, "league conquered");
        bus.push(BattleEvent::ChampionshipWon {
            category: self.state.category.clone(),
            progress,
        });
        self.finish(BattleOutcome::PlayerWon, bus);
    }
}
