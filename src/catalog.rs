//! The creature catalog: where combatants and their move lists come from.
//!
//! Catalog records are loosely typed (type names as strings, stats as a named
//! list, moves with optional power). They are parsed into [`Combatant`] and
//! [`Move`] values here, so the battle engine only ever sees typed data.

use crate::battle::rng::RandomSource;
use crate::combatant::Combatant;
use crate::errors::{CatalogError, CatalogResult};
use crate::team::generate_opponent_ids;
use schema::{BaseStats, CatalogDocument, CreatureId, ElementType, Move, RawMove, SpeciesRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

static EMBEDDED_CATALOG: &str = include_str!("../data/catalog.ron");

/// Supplies fully built combatants to the engine.
pub trait CreatureCatalog {
    /// Every creature id belonging to a category.
    fn category_pool(&self, category: &str) -> CatalogResult<Vec<CreatureId>>;

    /// A full-HP combatant with a freshly drawn move roster.
    fn build_combatant(
        &self,
        id: CreatureId,
        rng: &mut dyn RandomSource,
    ) -> CatalogResult<Combatant>;

    /// A new random move roster for an existing combatant.
    fn refresh_moves(&self, id: CreatureId, rng: &mut dyn RandomSource)
        -> CatalogResult<Vec<Move>>;
}

/// A catalog held entirely in memory, loaded from a RON document.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    species: HashMap<CreatureId, SpeciesRecord>,
    categories: HashMap<String, Vec<CreatureId>>,
    moves_per_combatant: usize,
}

impl StaticCatalog {
    pub fn from_document(
        document: CatalogDocument,
        moves_per_combatant: usize,
    ) -> CatalogResult<Self> {
        let mut species = HashMap::new();
        for record in document.species {
            if species.insert(record.id, record).is_some() {
                return Err(CatalogError::Malformed("duplicate species id".to_string()));
            }
        }

        for (category, ids) in &document.categories {
            if let Some(missing) = ids.iter().find(|id| !species.contains_key(id)) {
                return Err(CatalogError::Malformed(format!(
                    "category '{}' lists unknown creature {}",
                    category, missing
                )));
            }
        }

        Ok(Self {
            species,
            categories: document.categories,
            moves_per_combatant,
        })
    }

    pub fn from_ron_str(content: &str, moves_per_combatant: usize) -> CatalogResult<Self> {
        let document: CatalogDocument =
            ron::from_str(content).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Self::from_document(document, moves_per_combatant)
    }

    pub fn load(path: &Path, moves_per_combatant: usize) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::Malformed(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content, moves_per_combatant)
    }

    /// The catalog bundled with the crate.
    pub fn embedded(moves_per_combatant: usize) -> CatalogResult<Self> {
        Self::from_ron_str(EMBEDDED_CATALOG, moves_per_combatant)
    }

    /// Category names in alphabetical order.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn record(&self, id: CreatureId) -> CatalogResult<&SpeciesRecord> {
        self.species
            .get(&id)
            .ok_or(CatalogError::CreatureNotFound(id))
    }

    fn parse_types(record: &SpeciesRecord) -> CatalogResult<Vec<ElementType>> {
        record
            .types
            .iter()
            .map(|name| {
                ElementType::from_str(name).map_err(|_| CatalogError::UnknownType(name.clone()))
            })
            .collect()
    }

    fn parse_stats(record: &SpeciesRecord) -> CatalogResult<BaseStats> {
        let lookup = |stat: &str| {
            record
                .stats
                .iter()
                .find(|raw| raw.name == stat)
                .map(|raw| raw.value)
        };
        let required = |stat: &'static str| {
            lookup(stat).ok_or(CatalogError::MissingStat {
                creature: record.id,
                stat,
            })
        };

        Ok(BaseStats {
            hp: required("hp")?,
            attack: required("attack")?,
            defense: required("defense")?,
            sp_attack: lookup("special-attack").unwrap_or(0),
            sp_defense: lookup("special-defense").unwrap_or(0),
            speed: lookup("speed").unwrap_or(0),
        })
    }

    fn parse_move(raw: &RawMove) -> Option<Move> {
        let power = raw.power.filter(|&power| power > 0)?;
        match ElementType::from_str(&raw.move_type) {
            Ok(element) => Some(Move::new(raw.name.replace('-', " "), power, element)),
            Err(_) => {
                tracing::warn!(move_name = %raw.name, move_type = %raw.move_type, "skipping move with unknown type");
                None
            }
        }
    }

    /// Shuffle the move pool and keep the first damaging moves, up to the roster cap.
    fn draw_moves(&self, record: &SpeciesRecord, rng: &mut dyn RandomSource) -> Vec<Move> {
        let mut order: Vec<usize> = (0..record.moves.len()).collect();
        for i in (1..order.len()).rev() {
            let j = rng.next_index(i + 1, "move shuffle");
            order.swap(i, j);
        }

        order
            .into_iter()
            .filter_map(|index| Self::parse_move(&record.moves[index]))
            .take(self.moves_per_combatant)
            .collect()
    }
}

impl CreatureCatalog for StaticCatalog {
    fn category_pool(&self, category: &str) -> CatalogResult<Vec<CreatureId>> {
        self.categories
            .get(category)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))
    }

    fn build_combatant(
        &self,
        id: CreatureId,
        rng: &mut dyn RandomSource,
    ) -> CatalogResult<Combatant> {
        let record = self.record(id)?;
        let types = Self::parse_types(record)?;
        let stats = Self::parse_stats(record)?;
        let moves = self.draw_moves(record, rng);
        Ok(Combatant::new(id, record.name.clone(), types, stats, moves))
    }

    fn refresh_moves(
        &self,
        id: CreatureId,
        rng: &mut dyn RandomSource,
    ) -> CatalogResult<Vec<Move>> {
        let record = self.record(id)?;
        Ok(self.draw_moves(record, rng))
    }
}

/// Build up to `team_size` combatants from `pool`, never using an id in `exclude`.
///
/// Ids are drawn uniformly without replacement. An id the catalog cannot turn
/// into a combatant with usable moves is logged and skipped, and sampling
/// continues until the team is full or the pool runs dry.
pub fn draw_team<C: CreatureCatalog + ?Sized>(
    catalog: &C,
    pool: &[CreatureId],
    exclude: &[CreatureId],
    team_size: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Combatant> {
    let mut tried = exclude.to_vec();
    let mut members = Vec::with_capacity(team_size);

    while members.len() < team_size {
        let Some(id) = generate_opponent_ids(pool, &tried, 1, rng).pop() else {
            break;
        };
        tried.push(id);

        match catalog.build_combatant(id, rng) {
            Ok(combatant) if combatant.has_usable_moves() => members.push(combatant),
            Ok(combatant) => {
                tracing::warn!(creature = %id, name = %combatant.name, "skipping creature without usable moves")
            }
            Err(err) => tracing::warn!(creature = %id, error = %err, "skipping unbuildable creature"),
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::BattleRng;
    use pretty_assertions::assert_eq;

    const SMALL_CATALOG: &str = r#"(
        categories: { "starter": [1, 4] },
        species: [
            (
                id: 1,
                name: "sproutling",
                types: ["grass", "poison"],
                stats: [
                    (name: "hp", value: 45),
                    (name: "attack", value: 49),
                    (name: "defense", value: 49),
                    (name: "speed", value: 45),
                ],
                moves: [
                    (name: "vine-whip", power: Some(45), type: "grass"),
                    (name: "growl", type: "normal"),
                    (name: "tackle", power: Some(40), type: "normal"),
                    (name: "razor-leaf", power: Some(55), type: "grass"),
                ],
            ),
            (
                id: 4,
                name: "embercub",
                types: ["fire"],
                stats: [(name: "hp", value: 39), (name: "defense", value: 43)],
                moves: [(name: "ember", power: Some(40), type: "fire")],
            ),
        ],
    )"#;

    #[test]
    fn builds_typed_combatant_from_raw_record() {
        let catalog = StaticCatalog::from_ron_str(SMALL_CATALOG, 6).unwrap();
        let mut rng = BattleRng::from_seed(1);
        let combatant = catalog.build_combatant(CreatureId(1), &mut rng).unwrap();

        assert_eq!(combatant.name, "sproutling");
        assert_eq!(combatant.types(), &[ElementType::Grass, ElementType::Poison]);
        assert_eq!(combatant.max_hp(), 45 * 3 + 50);
        assert_eq!(combatant.stats().sp_attack, 0);
        // Growl has no power and never makes the roster.
        assert_eq!(combatant.moves().len(), 3);
        assert!(combatant.find_move("vine whip").is_some());
        assert!(combatant.find_move("growl").is_none());
    }

    #[test]
    fn roster_respects_the_cap() {
        let catalog = StaticCatalog::from_ron_str(SMALL_CATALOG, 2).unwrap();
        let mut rng = BattleRng::from_seed(5);
        let moves = catalog.refresh_moves(CreatureId(1), &mut rng).unwrap();
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn shuffle_uses_the_random_source() {
        let catalog = StaticCatalog::from_ron_str(SMALL_CATALOG, 6).unwrap();
        // Four moves take three swaps; all zeros rotate the first entry to the back.
        let mut rng = BattleRng::new_for_test(vec![0.0, 0.0, 0.0]);
        let moves = catalog.refresh_moves(CreatureId(1), &mut rng).unwrap();
        let names: Vec<&str> = moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["tackle", "razor leaf", "vine whip"]);
    }

    #[test]
    fn missing_required_stat_is_reported() {
        let catalog = StaticCatalog::from_ron_str(SMALL_CATALOG, 6).unwrap();
        let mut rng = BattleRng::from_seed(1);
        assert_eq!(
            catalog.build_combatant(CreatureId(4), &mut rng),
            Err(CatalogError::MissingStat {
                creature: CreatureId(4),
                stat: "attack"
            })
        );
    }

    #[test]
    fn unknown_ids_and_categories() {
        let catalog = StaticCatalog::from_ron_str(SMALL_CATALOG, 6).unwrap();
        let mut rng = BattleRng::from_seed(1);
        assert_eq!(
            catalog.build_combatant(CreatureId(99), &mut rng),
            Err(CatalogError::CreatureNotFound(CreatureId(99)))
        );
        assert_eq!(
            catalog.category_pool("legendary"),
            Err(CatalogError::UnknownCategory("legendary".to_string()))
        );
        assert_eq!(
            catalog.category_pool("starter"),
            Ok(vec![CreatureId(1), CreatureId(4)])
        );
    }

    #[test]
    fn category_with_unknown_member_is_malformed() {
        let broken = r#"(categories: { "x": [7] }, species: [])"#;
        assert!(matches!(
            StaticCatalog::from_ron_str(broken, 6),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn draw_team_skips_creatures_it_cannot_build() {
        let catalog = StaticCatalog::from_ron_str(SMALL_CATALOG, 6).unwrap();
        // 0.99 picks embercub first (missing a stat), then sproutling is all that is left.
        let mut rng = BattleRng::new_for_test(vec![0.99, 0.0, 0.0, 0.0, 0.0]);
        let team = draw_team(&catalog, &[CreatureId(1), CreatureId(4)], &[], 2, &mut rng);
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].name, "sproutling");
    }

    #[test]
    fn draw_team_respects_exclusions() {
        let catalog = StaticCatalog::embedded(6).unwrap();
        let pool = catalog.category_pool("normal").unwrap();
        let exclude = vec![pool[0], pool[1]];
        let mut rng = BattleRng::from_seed(4);
        let team = draw_team(&catalog, &pool, &exclude, 3, &mut rng);
        assert_eq!(team.len(), 3);
        assert!(team.iter().all(|member| !exclude.contains(&member.id)));
    }

    #[test]
    fn embedded_catalog_builds_every_creature() {
        let catalog = StaticCatalog::embedded(6).unwrap();
        assert_eq!(catalog.categories(), vec!["legendary", "mythical", "normal", "rare"]);

        let mut rng = BattleRng::from_seed(9);
        for category in catalog.categories() {
            for id in catalog.category_pool(category).unwrap() {
                let combatant = catalog.build_combatant(id, &mut rng).unwrap();
                assert!(combatant.has_usable_moves(), "{} has no moves", combatant.name);
                assert!(combatant.moves().len() <= 6);
                assert!((1..=2).contains(&combatant.types().len()));
            }
        }
    }
}
