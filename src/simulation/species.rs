//! Species grouping by brain similarity.
//!
//! Species are rebuilt from scratch on every pass and live only inside a
//! single evolution cycle. Members are stored as indices into the agent slice
//! the pass was run on, so a [`Species`] is meaningless once that slice
//! changes.

use super::agent::Agent;

/// An ephemeral group of similar agents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    id: usize,
    members: Vec<usize>,
}

impl Species {
    fn new(id: usize, founder: usize) -> Self {
        Self {
            id,
            members: vec![founder],
        }
    }

    /// Id assigned in creation order, starting at 0 within a pass.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Indices of member agents, in assignment order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Index of the first agent placed in this species.
    pub fn representative(&self) -> usize {
        self.members[0]
    }

    /// Number of members (always at least 1).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a species starts with its founder.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Arithmetic mean of the members' individual fitness.
    pub fn mean_fitness<A: Agent>(&self, agents: &[A]) -> f32 {
        let total: f32 = self.members.iter().map(|&i| agents[i].fitness()).sum();
        total / self.members.len() as f32
    }
}

/// Greedy, order-dependent species assignment.
///
/// Agents are visited in slice order. Each joins the first existing species
/// whose representative lies strictly closer than `threshold`, or founds a
/// new species otherwise.
pub fn speciate<A: Agent>(agents: &[A], threshold: f32) -> Vec<Species> {
    let mut species: Vec<Species> = Vec::new();

    for (idx, agent) in agents.iter().enumerate() {
        let home = species
            .iter_mut()
            .find(|s| agent.distance(&agents[s.representative()]) < threshold);

        match home {
            Some(s) => s.members.push(idx),
            None => {
                let id = species.len();
                species.push(Species::new(id, idx));
            }
        }
    }

    species
}
