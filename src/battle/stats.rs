use schema::ElementType;
use serde::{Deserialize, Serialize};

/// Combined multiplier of an attacking type against every defending type.
///
/// Single-type entries multiply together, so dual-typed defenders land in
/// {0, 0.25, 0.5, 1, 2, 4}. Chart gaps count as 1.
pub fn multiplier_for(attack_type: ElementType, defend_types: &[ElementType]) -> f64 {
    defend_types
        .iter()
        .map(|&defend_type| ElementType::type_effectiveness(attack_type, defend_type))
        .product()
}

/// How well one line-up of types fares against another.
///
/// Adds the chart value of every (ours, theirs) pair with us attacking, then
/// subtracts every (theirs, ours) pair with them attacking.
pub fn matchup_score(our_types: &[ElementType], their_types: &[ElementType]) -> f64 {
    let mut score = 0.0;
    for &ours in our_types {
        for &theirs in their_types {
            score += ElementType::type_effectiveness(ours, theirs);
        }
    }
    for &theirs in their_types {
        for &ours in our_types {
            score -= ElementType::type_effectiveness(theirs, ours);
        }
    }
    score
}

/// Coarse classification of a type multiplier, used for battle messages.
/// Doubly resisted hits share the `NotVeryEffective` tag with single resists.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectivenessTag {
    None,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl EffectivenessTag {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier <= 0.0 {
            EffectivenessTag::None
        } else if multiplier < 1.0 {
            EffectivenessTag::NotVeryEffective
        } else if multiplier > 1.0 {
            EffectivenessTag::SuperEffective
        } else {
            EffectivenessTag::Normal
        }
    }

    /// Battle message for this tag; neutral hits have none.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            EffectivenessTag::None => Some("It had no effect!"),
            EffectivenessTag::NotVeryEffective => Some("It's not very effective..."),
            EffectivenessTag::Normal => None,
            EffectivenessTag::SuperEffective => Some("It's super effective!"),
        }
    }
}
