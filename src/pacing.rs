//! Renderer-side pacing. The engine emits events immediately; this replays
//! them with pauses so a display has time to show each step.

use crate::battle::state::{BattleEvent, EventBus};
use crate::config::PacingConfig;
use std::time::Duration;

pub struct EventScheduler {
    pacing: PacingConfig,
}

impl EventScheduler {
    pub fn new(pacing: PacingConfig) -> Self {
        Self { pacing }
    }

    /// How long to wait after showing `event`.
    pub fn delay_for(&self, event: &BattleEvent) -> Duration {
        let millis = match event {
            BattleEvent::MoveUsed { .. } => self.pacing.attack_ms,
            BattleEvent::DamageDealt { .. } | BattleEvent::CombatantSwitched { .. } => {
                self.pacing.turn_handoff_ms
            }
            BattleEvent::CombatantFainted { .. } => self.pacing.faint_ms,
            BattleEvent::LeagueAdvanced { .. } | BattleEvent::ChampionshipWon { .. } => {
                self.pacing.league_transition_ms
            }
            BattleEvent::BattleRestarted => self.pacing.restart_ms,
            _ => 0,
        };
        Duration::from_millis(millis)
    }

    /// Hand each event to `render` in order, sleeping between them.
    pub async fn replay<F>(&self, bus: &EventBus, mut render: F)
    where
        F: FnMut(&BattleEvent),
    {
        for event in bus.events() {
            render(event);
            let delay = self.delay_for(event);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Total time a full replay of `bus` would take.
    pub fn total_delay(&self, bus: &EventBus) -> Duration {
        bus.events().iter().map(|event| self.delay_for(event)).sum()
    }
}
