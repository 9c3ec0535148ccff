use crate::battle::ai::{Behavior, BotAction, MatchupAI};
use crate::battle::calculators::resolve_attack;
use crate::battle::rng::{BattleRng, RandomSource};
use crate::battle::state::{BattleEvent, BattleOutcome, BattleState, EventBus, Side, TurnPhase};
use crate::catalog::{draw_team, CreatureCatalog, StaticCatalog};
use crate::config::EngineConfig;
use crate::errors::{ActionError, BattleResult, DataError};
use crate::team::Team;
use schema::{BattleMode, Move};

/// Where the opponent's team comes from when a battle starts.
#[derive(Debug, Clone)]
pub enum OpponentTeam {
    /// Use this team as given.
    Provided(Team),
    /// Draw a team from the battle's category, excluding the player's picks.
    Generated,
}

/// Everything needed to start a battle.
#[derive(Debug, Clone)]
pub struct BattleSetup {
    pub player: Team,
    pub opponents: OpponentTeam,
    pub mode: BattleMode,
    pub category: String,
}

/// The turn state machine. Owns the battle state and is the only thing that
/// mutates it; every entry point returns the events it produced, in order.
///
/// Rejected actions return an [`ActionError`] and leave the state untouched.
pub struct BattleEngine<C = StaticCatalog, R = BattleRng> {
    pub(super) state: BattleState,
    pub(super) config: EngineConfig,
    pub(super) catalog: C,
    pub(super) rng: R,
    behavior: Box<dyn Behavior>,
}

impl<C: CreatureCatalog, R: RandomSource> BattleEngine<C, R> {
    /// Validate both teams and open the battle.
    ///
    /// Any team problem is reported here as `DataIncomplete`, never later in
    /// the battle.
    pub fn start_battle(
        setup: BattleSetup,
        config: EngineConfig,
        catalog: C,
        mut rng: R,
    ) -> BattleResult<(Self, EventBus)> {
        config.validate()?;

        let BattleSetup {
            player,
            opponents,
            mode,
            category,
        } = setup;
        let expected = required_team_size(mode, &config);

        let mut player = player;
        validate_team(&player, Side::Player)?;
        if player.len() != expected {
            return Err(DataError::TeamSizeMismatch {
                expected,
                actual: player.len(),
            }
            .into());
        }
        lead_with_first_healthy(&mut player);

        // League rounds draw later challengers from the category.
        if mode.is_league() || matches!(opponents, OpponentTeam::Generated) {
            catalog.category_pool(&category)?;
        }

        let mut bot = match opponents {
            OpponentTeam::Provided(team) => {
                validate_team(&team, Side::Bot)?;
                if team.len() != expected {
                    return Err(DataError::TeamSizeMismatch {
                        expected,
                        actual: team.len(),
                    }
                    .into());
                }
                team
            }
            OpponentTeam::Generated => {
                let pool = catalog.category_pool(&category)?;
                let members = draw_team(&catalog, &pool, &player.ids(), expected, &mut rng);
                if members.is_empty() {
                    return Err(DataError::EmptyOpponentPool(category).into());
                }
                let team = Team::new(members);
                validate_team(&team, Side::Bot)?;
                team
            }
        };
        lead_with_first_healthy(&mut bot);

        let state = BattleState::new(player, bot, mode, category, config.league_challenges);
        let mut bus = EventBus::new();
        bus.push(BattleEvent::BattleStarted {
            mode,
            player_lead: lead_name(&state.player),
            opponent_lead: lead_name(&state.bot),
            league: state.league,
        });
        tracing::info!(
            %mode,
            category = %state.category,
            player = %lead_name(&state.player),
            opponent = %lead_name(&state.bot),
            "battle started"
        );

        let behavior = Box::new(MatchupAI::new(config.switch_threshold));
        let engine = Self {
            state,
            config,
            catalog,
            rng,
            behavior,
        };
        Ok((engine, bus))
    }

    /// Replace the opponent's decision logic.
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    /// Team indices the player may switch to right now.
    pub fn available_switches(&self) -> Vec<usize> {
        if self.state.is_players_turn() {
            self.state.player.valid_switches()
        } else {
            Vec::new()
        }
    }

    /// Attack with the named move of the player's active combatant, then let
    /// the opponent answer if its combatant is still standing.
    pub fn submit_player_attack(&mut self, move_name: &str) -> BattleResult<EventBus> {
        match self.state.phase {
            TurnPhase::AwaitingPlayer => {}
            TurnPhase::AwaitingReplacement => return Err(ActionError::ReplacementRequired.into()),
            TurnPhase::Resolving => return Err(ActionError::Resolving.into()),
            TurnPhase::BattleOver => return Err(ActionError::BattleOver.into()),
        }

        let move_ = self
            .state
            .active(Side::Player)
            .and_then(|active| active.find_move(move_name))
            .cloned()
            .ok_or_else(|| ActionError::MoveNotOwned(move_name.to_string()))?;

        let mut bus = EventBus::new();
        self.state.phase = TurnPhase::Resolving;

        if self.execute_attack(Side::Player, &move_, &mut bus) {
            self.handle_faint(Side::Bot, &mut bus);
        } else {
            self.bot_turn(&mut bus);
        }

        if !self.state.is_over() {
            self.state.turn_number += 1;
        }
        Ok(bus)
    }

    /// Bring in another team member.
    ///
    /// After a faint this is the forced replacement; otherwise it is a
    /// voluntary switch and the player keeps the turn.
    pub fn submit_player_switch(&mut self, index: usize) -> BattleResult<EventBus> {
        let forced = match self.state.phase {
            TurnPhase::AwaitingPlayer => false,
            TurnPhase::AwaitingReplacement => true,
            TurnPhase::Resolving => return Err(ActionError::Resolving.into()),
            TurnPhase::BattleOver => return Err(ActionError::BattleOver.into()),
        };

        let team = &self.state.player;
        let target = team
            .get(index)
            .ok_or(ActionError::InvalidTeamIndex(index))?;
        if index == team.active_index() {
            return Err(ActionError::AlreadyActive(index).into());
        }
        if target.is_fainted() {
            return Err(ActionError::CombatantFainted(index).into());
        }

        let mut bus = EventBus::new();
        self.switch_in(Side::Player, index, forced, &mut bus);
        self.state.phase = TurnPhase::AwaitingPlayer;
        Ok(bus)
    }

    /// Heal both teams and fight again with the same line-ups.
    pub fn rematch(&mut self) -> BattleResult<EventBus> {
        if self.state.mode.is_league() {
            return Err(ActionError::RematchUnavailable(self.state.mode).into());
        }
        if self.state.phase == TurnPhase::Resolving {
            return Err(ActionError::Resolving.into());
        }

        self.state.player.restore_all();
        self.state.bot.restore_all();
        self.state.outcome = None;
        self.state.turn_number = 1;
        self.state.phase = TurnPhase::AwaitingPlayer;

        let mut bus = EventBus::new();
        bus.push(BattleEvent::BattleRestarted);
        tracing::info!(mode = %self.state.mode, "battle restarted");
        Ok(bus)
    }

    /// Abandon the battle. Nobody wins.
    pub fn concede(&mut self) -> BattleResult<EventBus> {
        match self.state.phase {
            TurnPhase::BattleOver => return Err(ActionError::BattleOver.into()),
            TurnPhase::Resolving => return Err(ActionError::Resolving.into()),
            _ => {}
        }
        let mut bus = EventBus::new();
        self.finish(BattleOutcome::Conceded, &mut bus);
        Ok(bus)
    }

    /// Resolve one attack from `side` into the opposing active combatant.
    /// Returns true if the defender fainted.
    fn execute_attack(&mut self, side: Side, move_: &Move, bus: &mut EventBus) -> bool {
        let target_side = side.opponent();
        let (Some(attacker), Some(defender)) =
            (self.state.active(side), self.state.active(target_side))
        else {
            return false;
        };

        let outcome = resolve_attack(move_, attacker, defender, &mut self.rng);
        bus.push(BattleEvent::MoveUsed {
            side,
            combatant: attacker.name.clone(),
            move_name: move_.name.clone(),
            power: move_.power,
        });

        let Some(defender) = self.state.team_mut(target_side).active_mut() else {
            return false;
        };
        let fainted = defender.take_damage(outcome.damage);
        tracing::debug!(
            %side,
            move_name = %move_.name,
            damage = outcome.damage,
            multiplier = outcome.multiplier,
            remaining_hp = defender.current_hp(),
            "attack resolved"
        );
        bus.push(BattleEvent::DamageDealt {
            side: target_side,
            target: defender.name.clone(),
            damage: outcome.damage,
            remaining_hp: defender.current_hp(),
            max_hp: defender.max_hp(),
            effectiveness: outcome.effectiveness,
        });

        if fainted {
            bus.push(BattleEvent::CombatantFainted {
                side: target_side,
                combatant: defender.name.clone(),
            });
        }
        fainted
    }

    /// The opponent's half of the exchange.
    fn bot_turn(&mut self, bus: &mut EventBus) {
        let Some(player_active) = self.state.active(Side::Player) else {
            self.state.phase = TurnPhase::AwaitingPlayer;
            return;
        };
        let action = self.behavior.choose_action(
            &self.state.bot,
            player_active,
            self.state.mode,
            &mut self.rng,
        );

        match action {
            BotAction::Attack(move_) => {
                if self.execute_attack(Side::Bot, &move_, bus) {
                    self.handle_faint(Side::Player, bus);
                } else {
                    self.state.phase = TurnPhase::AwaitingPlayer;
                }
            }
            BotAction::Switch(index) if self.is_valid_bot_switch(index) => {
                self.switch_in(Side::Bot, index, false, bus);
                self.state.phase = TurnPhase::AwaitingPlayer;
            }
            BotAction::Switch(index) => {
                tracing::warn!(index, "opponent chose an invalid switch, passing the turn");
                self.state.phase = TurnPhase::AwaitingPlayer;
            }
        }
    }

    fn is_valid_bot_switch(&self, index: usize) -> bool {
        let team = &self.state.bot;
        index != team.active_index()
            && team.get(index).is_some_and(|member| !member.is_fainted())
    }

    /// Settle what happens after `side`'s active combatant fainted.
    fn handle_faint(&mut self, side: Side, bus: &mut EventBus) {
        if self.state.team(side).all_fainted() {
            match side {
                Side::Bot if self.state.mode.is_league() => self.advance_league(bus),
                Side::Bot => self.finish(BattleOutcome::PlayerWon, bus),
                Side::Player => self.finish(BattleOutcome::BotWon, bus),
            }
            return;
        }

        bus.push(BattleEvent::SwitchRequired { side });
        match side {
            Side::Player => {
                self.state.phase = TurnPhase::AwaitingReplacement;
            }
            Side::Bot => {
                let choice = self
                    .state
                    .active(Side::Player)
                    .and_then(|player_active| {
                        self.behavior
                            .choose_replacement(&self.state.bot, player_active)
                    })
                    .filter(|&index| self.is_valid_bot_switch(index))
                    .or_else(|| self.state.bot.first_healthy_index());

                if let Some(index) = choice {
                    self.switch_in(Side::Bot, index, true, bus);
                }
                self.state.phase = TurnPhase::AwaitingPlayer;
            }
        }
    }

    pub(super) fn switch_in(&mut self, side: Side, index: usize, forced: bool, bus: &mut EventBus) {
        let team = self.state.team_mut(side);
        let old_combatant = team
            .active()
            .map(|member| member.name.clone())
            .unwrap_or_default();
        team.set_active(index);
        let new_combatant = team
            .active()
            .map(|member| member.name.clone())
            .unwrap_or_default();

        tracing::debug!(%side, from = %old_combatant, to = %new_combatant, forced, "switch");
        bus.push(BattleEvent::CombatantSwitched {
            side,
            old_combatant,
            new_combatant,
            forced,
        });
    }

    pub(super) fn finish(&mut self, outcome: BattleOutcome, bus: &mut EventBus) {
        self.state.outcome = Some(outcome);
        self.state.phase = TurnPhase::BattleOver;
        tracing::info!(?outcome, turns = self.state.turn_number, "battle ended");
        bus.push(BattleEvent::BattleEnded { outcome });
    }
}

/// Team length each mode expects.
pub fn required_team_size(mode: BattleMode, config: &EngineConfig) -> usize {
    match mode {
        BattleMode::Single | BattleMode::League => 1,
        BattleMode::Team => config.team_size,
    }
}

fn validate_team(team: &Team, side: Side) -> Result<(), DataError> {
    if team.is_empty() {
        return Err(DataError::EmptyTeam(side));
    }
    if let Some(member) = team.members().iter().find(|m| !m.has_usable_moves()) {
        return Err(DataError::NoUsableMoves(member.name.clone()));
    }
    if !team.has_healthy_member() {
        return Err(DataError::NoHealthyCombatant(side));
    }
    Ok(())
}

fn lead_with_first_healthy(team: &mut Team) {
    if let Some(index) = team.first_healthy_index() {
        team.set_active(index);
    }
}

fn lead_name(team: &Team) -> String {
    team.active()
        .map(|member| member.name.clone())
        .unwrap_or_default()
}
