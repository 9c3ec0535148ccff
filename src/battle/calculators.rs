use crate::battle::rng::RandomSource;
use crate::battle::stats::{multiplier_for, EffectivenessTag};
use crate::combatant::Combatant;
use schema::Move;

/// Both sides are treated as this level in the damage formula.
pub const BATTLE_LEVEL: f64 = 50.0;

/// Bounds of the damage jitter.
pub const RANDOM_FACTOR_MIN: f64 = 0.85;
pub const RANDOM_FACTOR_MAX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub multiplier: f64,
    pub effectiveness: EffectivenessTag,
}

/// Draw the damage jitter for one attack.
pub fn roll_random_factor(rng: &mut dyn RandomSource) -> f64 {
    rng.next_range(RANDOM_FACTOR_MIN, RANDOM_FACTOR_MAX, "damage jitter")
}

/// Damage of `move_` from `attacker` into `defender` for a given jitter.
///
/// Pure: the caller supplies `random_factor`, so the same inputs always give
/// the same outcome. A zero multiplier always yields zero damage.
pub fn calculate_damage(
    move_: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    random_factor: f64,
) -> DamageOutcome {
    let attack = attacker.attack() as f64;
    // Guard the division; catalog stats are positive in practice.
    let defense = (defender.defense() as f64).max(1.0);

    let base =
        ((2.0 * BATTLE_LEVEL / 5.0 + 2.0) * move_.power as f64 * attack / defense / 50.0) + 2.0;
    let multiplier = multiplier_for(move_.element, defender.types());
    let raw = (base * multiplier * random_factor).floor();

    DamageOutcome {
        damage: raw.clamp(0.0, u16::MAX as f64) as u16,
        multiplier,
        effectiveness: EffectivenessTag::from_multiplier(multiplier),
    }
}

/// Roll the jitter from `rng` and resolve the attack.
pub fn resolve_attack(
    move_: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut dyn RandomSource,
) -> DamageOutcome {
    let random_factor = roll_random_factor(rng);
    calculate_damage(move_, attacker, defender, random_factor)
}
