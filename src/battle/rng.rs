use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws for everything random in a battle.
///
/// `reason` names the consumer of each draw; scripted sources use it to make
/// exhaustion failures readable.
pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn next_unit(&mut self, reason: &str) -> f64;

    /// A uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize, reason: &str) -> usize {
        let index = (self.next_unit(reason) * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    /// A uniform draw between `low` and `high`.
    fn next_range(&mut self, low: f64, high: f64, reason: &str) -> f64 {
        low + (high - low) * self.next_unit(reason)
    }
}

#[derive(Debug, Clone)]
enum Draws {
    Seeded(StdRng),
    Scripted { outcomes: Vec<f64>, index: usize },
}

/// The engine's random source: either a seeded generator or a fixed script.
#[derive(Debug, Clone)]
pub struct BattleRng {
    draws: Draws,
}

impl BattleRng {
    pub fn new_random() -> Self {
        Self {
            draws: Draws::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            draws: Draws::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replays `outcomes` in order. Values are returned as given, so a script
    /// may use `1.0` to pin a range draw to its upper bound.
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            draws: Draws::Scripted { outcomes, index: 0 },
        }
    }

    /// Number of scripted draws not consumed yet; `None` for seeded sources.
    pub fn remaining(&self) -> Option<usize> {
        match &self.draws {
            Draws::Seeded(_) => None,
            Draws::Scripted { outcomes, index } => Some(outcomes.len() - index),
        }
    }
}

impl RandomSource for BattleRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        match &mut self.draws {
            Draws::Seeded(rng) => rng.random::<f64>(),
            Draws::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", outcome, reason);

                *index += 1;
                outcome
            }
        }
    }
}
