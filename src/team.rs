use crate::battle::rng::RandomSource;
use crate::combatant::Combatant;
use schema::CreatureId;
use serde::{Deserialize, Serialize};

/// A fixed-length line-up with the index of the combatant currently in play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    members: Vec<Combatant>,
    active_index: usize,
}

impl Team {
    pub fn new(members: Vec<Combatant>) -> Self {
        Team {
            members,
            active_index: 0,
        }
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Get the combatant currently in play
    pub fn active(&self) -> Option<&Combatant> {
        self.members.get(self.active_index)
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut Combatant> {
        self.members.get_mut(self.active_index)
    }

    pub(crate) fn members_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.members.iter_mut()
    }

    pub(crate) fn set_active(&mut self, index: usize) {
        self.active_index = index;
    }

    pub fn all_fainted(&self) -> bool {
        self.members.iter().all(Combatant::is_fainted)
    }

    pub fn has_healthy_member(&self) -> bool {
        !self.all_fainted()
    }

    /// Index of the first combatant still able to fight, in team order.
    pub fn first_healthy_index(&self) -> Option<usize> {
        self.members.iter().position(|member| !member.is_fainted())
    }

    /// Indices of every non-fainted member other than the active one.
    pub fn valid_switches(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(index, member)| *index != self.active_index && !member.is_fainted())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn ids(&self) -> Vec<CreatureId> {
        self.members.iter().map(|member| member.id).collect()
    }

    /// Heal every member and put the first one back in play.
    pub(crate) fn restore_all(&mut self) {
        for member in &mut self.members {
            member.restore();
        }
        self.active_index = 0;
    }
}

/// Draw opponent ids from `pool`, skipping anything the player picked.
///
/// Sampling is uniform and without replacement; it stops once `team_size` ids
/// are drawn or the pool runs dry.
pub fn generate_opponent_ids(
    pool: &[CreatureId],
    player_ids: &[CreatureId],
    team_size: usize,
    rng: &mut dyn RandomSource,
) -> Vec<CreatureId> {
    let mut candidates: Vec<CreatureId> = pool
        .iter()
        .copied()
        .filter(|id| !player_ids.contains(id))
        .collect();

    let mut picked = Vec::with_capacity(team_size);
    while picked.len() < team_size && !candidates.is_empty() {
        let index = rng.next_index(candidates.len(), "opponent id");
        picked.push(candidates.swap_remove(index));
    }
    picked
}
