use crate::battle::stats::EffectivenessTag;
use crate::combatant::Combatant;
use crate::team::Team;
use schema::BattleMode;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Bot,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Bot,
            Side::Bot => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Bot => write!(f, "opponent"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum TurnPhase {
    /// The player may attack or switch.
    AwaitingPlayer,
    /// The player's active combatant fainted; only a switch is accepted.
    AwaitingReplacement,
    /// An action is being resolved; no input is accepted.
    Resolving,
    BattleOver,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum BattleOutcome {
    PlayerWon,
    BotWon,
    /// The player walked away; nobody won.
    Conceded,
}

impl BattleOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            BattleOutcome::PlayerWon => Some(Side::Player),
            BattleOutcome::BotWon => Some(Side::Bot),
            BattleOutcome::Conceded => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub struct LeagueProgress {
    pub wins: u32,
    pub total: u32,
}

impl LeagueProgress {
    pub fn new(total: u32) -> Self {
        Self { wins: 0, total }
    }

    /// 1-based number of the challenger currently being fought.
    pub fn current_round(&self) -> u32 {
        (self.wins + 1).min(self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.wins >= self.total
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum BattleEvent {
    BattleStarted {
        mode: BattleMode,
        player_lead: String,
        opponent_lead: String,
        league: Option<LeagueProgress>,
    },
    MoveUsed {
        side: Side,
        combatant: String,
        move_name: String,
        power: u16,
    },
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
        max_hp: u16,
        effectiveness: EffectivenessTag,
    },
    CombatantFainted {
        side: Side,
        combatant: String,
    },
    /// The side must bring in a new combatant before play continues.
    SwitchRequired {
        side: Side,
    },
    CombatantSwitched {
        side: Side,
        old_combatant: String,
        new_combatant: String,
        forced: bool,
    },
    TeamHealed {
        side: Side,
    },
    MovesRefreshed {
        side: Side,
        combatant: String,
    },
    LeagueAdvanced {
        progress: LeagueProgress,
        challenger: String,
    },
    ChampionshipWon {
        category: String,
        progress: LeagueProgress,
    },
    BattleRestarted,
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { league, .. } => match league {
                Some(progress) => Some(format!(
                    "The battle is about to begin! League Challenge: Trainer {} of {}.",
                    progress.current_round(),
                    progress.total
                )),
                None => Some("The battle is about to begin!".to_string()),
            },

            BattleEvent::MoveUsed {
                combatant,
                move_name,
                power,
                ..
            } => Some(format!("{} used {} (Power: {})!", combatant, move_name, power)),

            BattleEvent::DamageDealt {
                damage,
                effectiveness,
                ..
            } => {
                let mut parts = Vec::new();
                if let Some(message) = effectiveness.message() {
                    parts.push(message.to_string());
                }
                if *damage > 0 {
                    parts.push(format!("It dealt {} damage.", damage));
                }
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" "))
                }
            }

            BattleEvent::CombatantFainted { combatant, .. } => {
                Some(format!("{} fainted!", combatant))
            }

            BattleEvent::SwitchRequired { side } => match side {
                Side::Player => Some("You must choose another creature.".to_string()),
                Side::Bot => {
                    Some("The opponent is about to send in another creature.".to_string())
                }
            },

            BattleEvent::CombatantSwitched {
                side,
                old_combatant,
                new_combatant,
                forced,
            } => match side {
                Side::Player if *forced => Some(format!(
                    "Come back, {}! Go, {}! What will {} do?",
                    old_combatant, new_combatant, new_combatant
                )),
                Side::Player => Some(format!(
                    "Come back, {}! Go, {}! It's still your turn.",
                    old_combatant, new_combatant
                )),
                Side::Bot => Some(format!(
                    "{} returns! The opponent sends out {}!",
                    old_combatant, new_combatant
                )),
            },

            BattleEvent::TeamHealed { side } => match side {
                Side::Player => Some("Your team has been fully healed.".to_string()),
                Side::Bot => None,
            },

            BattleEvent::MovesRefreshed { combatant, .. } => {
                Some(format!("{}'s moves have been refreshed!", combatant))
            }

            BattleEvent::LeagueAdvanced {
                progress,
                challenger,
            } => Some(format!(
                "You defeated the challenger! Challenger {} / {}: {} appears!",
                progress.current_round(),
                progress.total,
                challenger
            )),

            BattleEvent::ChampionshipWon { category, .. } => Some(format!(
                "You defeated the final challenger! You have conquered the {} league!",
                category
            )),

            BattleEvent::BattleRestarted => Some("Rematch! The battle begins again!".to_string()),

            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::PlayerWon => Some(match battle_state.winner_name() {
                    Some(name) => format!("You are victorious! {} was the key to victory!", name),
                    None => "You are victorious!".to_string(),
                }),
                BattleOutcome::BotWon if battle_state.mode.is_league() => {
                    Some("You lost the challenge. Better luck next time!".to_string())
                }
                BattleOutcome::BotWon => Some(match battle_state.winner_name() {
                    Some(name) => format!("You have been defeated! {} was the key to victory!", name),
                    None => "You have been defeated!".to_string(),
                }),
                BattleOutcome::Conceded => Some("You left the battle.".to_string()),
            },
        }
    }
}

/// Event bus for collecting battle events in the order they happen.
///
/// ```rust,ignore
/// let bus = engine.submit_player_attack("ember")?;
/// for event in bus.events() {
///     if let Some(text) = event.format(engine.state()) {
///         println!("{}", text);
///     }
/// }
/// println!("{}", bus.to_json());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Serialize the events as a JSON array for out-of-process renderers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.events).unwrap_or(serde_json::Value::Null)
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Everything the engine knows about a battle in progress.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub player: Team,
    pub bot: Team,
    pub phase: TurnPhase,
    pub mode: BattleMode,
    pub category: String,
    pub league: Option<LeagueProgress>,
    pub outcome: Option<BattleOutcome>,
    pub turn_number: u32,
}

impl BattleState {
    pub fn new(
        player: Team,
        bot: Team,
        mode: BattleMode,
        category: String,
        league_challenges: u32,
    ) -> Self {
        Self {
            player,
            bot,
            phase: TurnPhase::AwaitingPlayer,
            mode,
            category,
            league: mode.is_league().then(|| LeagueProgress::new(league_challenges)),
            outcome: None,
            turn_number: 1,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Bot => &self.bot,
        }
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Bot => &mut self.bot,
        }
    }

    pub fn active(&self, side: Side) -> Option<&Combatant> {
        self.team(side).active()
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::BattleOver
    }

    /// True whenever the player may act, including the forced-switch window.
    pub fn is_players_turn(&self) -> bool {
        matches!(
            self.phase,
            TurnPhase::AwaitingPlayer | TurnPhase::AwaitingReplacement
        )
    }

    /// Name of the first healthy combatant on the winning side.
    pub fn winner_name(&self) -> Option<&str> {
        let side = self.outcome?.winner()?;
        self.team(side)
            .members()
            .iter()
            .find(|member| !member.is_fainted())
            .map(|member| member.name.as_str())
    }
}
