use crate::battle::engine::{BattleEngine, BattleSetup, OpponentTeam};
use crate::battle::rng::{BattleRng, RandomSource};
use crate::battle::state::EventBus;
use crate::catalog::CreatureCatalog;
use crate::combatant::Combatant;
use crate::config::{EngineConfig, PacingConfig};
use crate::errors::{CatalogError, CatalogResult};
use crate::team::Team;
use schema::{BaseStats, BattleMode, CreatureId, ElementType, Move};
use std::collections::HashMap;

/// A builder for creating test combatants with common defaults.
///
/// Every stat defaults to 50 and the roster to a single 40-power move of the
/// combatant's own type.
///
/// # Example
/// ```
/// let combatant = TestCombatantBuilder::new("embercub", ElementType::Fire)
///     .with_moves(vec![Move::new("ember", 40, ElementType::Fire)])
///     .with_hp_fraction(0.5)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    id: CreatureId,
    name: String,
    types: Vec<ElementType>,
    stats: BaseStats,
    moves: Option<Vec<Move>>,
    hp_fraction: Option<f64>,
    fainted: bool,
}

impl TestCombatantBuilder {
    pub fn new(name: &str, element: ElementType) -> Self {
        Self {
            id: CreatureId(1),
            name: name.to_string(),
            types: vec![element],
            stats: BaseStats {
                hp: 50,
                attack: 50,
                defense: 50,
                sp_attack: 50,
                sp_defense: 50,
                speed: 50,
            },
            moves: None,
            hp_fraction: None,
            fainted: false,
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = CreatureId(id);
        self
    }

    pub fn with_types(mut self, types: Vec<ElementType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Start below full HP. The fraction is rounded to whole HP and never
    /// reaches zero; use [`TestCombatantBuilder::fainted`] for that.
    pub fn with_hp_fraction(mut self, fraction: f64) -> Self {
        self.hp_fraction = Some(fraction);
        self
    }

    pub fn fainted(mut self) -> Self {
        self.fainted = true;
        self
    }

    pub fn build(self) -> Combatant {
        let default_move = Move::new("strike", 40, self.types[0]);
        let moves = self.moves.unwrap_or_else(|| vec![default_move]);
        let mut combatant = Combatant::new(self.id, self.name, self.types, self.stats, moves);

        if let Some(fraction) = self.hp_fraction {
            let max_hp = combatant.max_hp();
            let target = ((max_hp as f64 * fraction).round() as u16).max(1);
            combatant.take_damage(max_hp - target.min(max_hp));
        }
        if self.fainted {
            combatant.take_damage(u16::MAX);
        }
        combatant
    }
}

/// Catalog over a fixed set of prebuilt combatants. It never draws from the
/// random source, so scripted draws only cover damage, bot moves and ids.
pub struct TestCatalog {
    combatants: HashMap<CreatureId, Combatant>,
    categories: HashMap<String, Vec<CreatureId>>,
    refreshed: HashMap<CreatureId, Vec<Move>>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self {
            combatants: HashMap::new(),
            categories: HashMap::new(),
            refreshed: HashMap::new(),
        }
    }

    /// Register a combatant under `category`.
    pub fn with(mut self, category: &str, combatant: Combatant) -> Self {
        self.categories
            .entry(category.to_string())
            .or_default()
            .push(combatant.id);
        self.combatants.insert(combatant.id, combatant);
        self
    }

    /// Moves handed out when `id` has its roster refreshed.
    pub fn with_refresh(mut self, id: u16, moves: Vec<Move>) -> Self {
        self.refreshed.insert(CreatureId(id), moves);
        self
    }
}

impl CreatureCatalog for TestCatalog {
    fn category_pool(&self, category: &str) -> CatalogResult<Vec<CreatureId>> {
        self.categories
            .get(category)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))
    }

    fn build_combatant(
        &self,
        id: CreatureId,
        _rng: &mut dyn RandomSource,
    ) -> CatalogResult<Combatant> {
        self.combatants
            .get(&id)
            .cloned()
            .ok_or(CatalogError::CreatureNotFound(id))
    }

    fn refresh_moves(
        &self,
        id: CreatureId,
        _rng: &mut dyn RandomSource,
    ) -> CatalogResult<Vec<Move>> {
        match self.refreshed.get(&id) {
            Some(moves) => Ok(moves.clone()),
            None => self
                .combatants
                .get(&id)
                .map(|combatant| combatant.moves().to_vec())
                .ok_or(CatalogError::CreatureNotFound(id)),
        }
    }
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        league_challenges: 3,
        team_size: 3,
        pacing: PacingConfig::instant(),
        ..EngineConfig::default()
    }
}

pub fn predictable_rng(outcomes: Vec<f64>) -> BattleRng {
    BattleRng::new_for_test(outcomes)
}

/// Start a battle between two prebuilt teams.
pub fn test_engine(
    player: Vec<Combatant>,
    bot: Vec<Combatant>,
    mode: BattleMode,
    catalog: TestCatalog,
    rng: BattleRng,
) -> (BattleEngine<TestCatalog, BattleRng>, EventBus) {
    let setup = BattleSetup {
        player: Team::new(player),
        opponents: OpponentTeam::Provided(Team::new(bot)),
        mode,
        category: "test".to_string(),
    };
    match BattleEngine::start_battle(setup, test_config(), catalog, rng) {
        Ok(started) => started,
        Err(err) => panic!("Failed to start test battle: {}", err),
    }
}

/// A 1v1 battle with an empty catalog.
pub fn single_battle(
    player: Combatant,
    bot: Combatant,
    rng: BattleRng,
) -> BattleEngine<TestCatalog, BattleRng> {
    test_engine(vec![player], vec![bot], BattleMode::Single, TestCatalog::new(), rng).0
}

/// Check the faint invariant for every combatant on both sides.
pub fn assert_faint_flags_consistent<C: CreatureCatalog, R: RandomSource>(
    engine: &BattleEngine<C, R>,
) {
    let state = engine.state();
    for member in state.player.members().iter().chain(state.bot.members()) {
        assert_eq!(
            member.is_fainted(),
            member.current_hp() == 0,
            "{} breaks the faint invariant",
            member.name
        );
    }
}
