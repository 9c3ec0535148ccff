#[cfg(test)]
mod tests {
    use crate::battle::engine::{required_team_size, BattleEngine, BattleSetup, OpponentTeam};
    use crate::battle::rng::BattleRng;
    use crate::battle::state::{BattleEvent, Side, TurnPhase};
    use crate::battle::tests::common::{assert_faint_flags_consistent, test_config};
    use crate::catalog::{draw_team, CreatureCatalog, StaticCatalog};
    use crate::team::Team;
    use rstest::rstest;
    use schema::BattleMode;

    const MAX_ACTIONS: usize = 500;

    fn seeded_battle(mode: BattleMode, category: &str, seed: u64) -> BattleEngine {
        let config = test_config();
        let catalog = StaticCatalog::embedded(config.moves_per_combatant).unwrap();
        let mut rng = BattleRng::from_seed(seed);
        let pool = catalog.category_pool(category).unwrap();
        let player = draw_team(&catalog, &pool, &[], required_team_size(mode, &config), &mut rng);

        let setup = BattleSetup {
            player: Team::new(player),
            opponents: OpponentTeam::Generated,
            mode,
            category: category.to_string(),
        };
        BattleEngine::start_battle(setup, config, catalog, rng)
            .unwrap()
            .0
    }

    /// Play to the end with the first move every turn, replacing fainted
    /// combatants with the first healthy bench member.
    #[rstest]
    #[case(BattleMode::Single, "normal", 1)]
    #[case(BattleMode::Team, "normal", 2)]
    #[case(BattleMode::Team, "rare", 3)]
    #[case(BattleMode::League, "legendary", 4)]
    #[case(BattleMode::League, "mythical", 5)]
    fn test_every_attack_has_exactly_one_outcome(
        #[case] mode: BattleMode,
        #[case] category: &str,
        #[case] seed: u64,
    ) {
        let mut engine = seeded_battle(mode, category, seed);

        for _ in 0..MAX_ACTIONS {
            if engine.state().is_over() {
                break;
            }

            if engine.phase() == TurnPhase::AwaitingReplacement {
                let index = engine.available_switches()[0];
                engine.submit_player_switch(index).unwrap();
                assert_eq!(engine.phase(), TurnPhase::AwaitingPlayer);
                continue;
            }

            let move_name = engine.state().player.active().unwrap().moves()[0].name.clone();
            let bus = engine.submit_player_attack(&move_name).unwrap();

            let ended = matches!(bus.events().last(), Some(BattleEvent::BattleEnded { .. }));
            let forced_switch = engine.phase() == TurnPhase::AwaitingReplacement;
            let turn_passed = engine.phase() == TurnPhase::AwaitingPlayer;
            let outcomes = [ended, forced_switch, turn_passed];
            assert_eq!(
                outcomes.iter().filter(|&&happened| happened).count(),
                1,
                "events: {:?}",
                bus.events()
            );
            if forced_switch {
                assert!(matches!(
                    bus.events().last(),
                    Some(BattleEvent::SwitchRequired { side: Side::Player })
                ));
            }
            assert_ne!(engine.phase(), TurnPhase::Resolving);
            assert_faint_flags_consistent(&engine);
        }

        assert!(engine.state().is_over(), "battle did not finish");
        assert!(engine.state().outcome.is_some());
    }
}
