//! Generation-to-generation evolution.
//!
//! Groups the finished population into species, scores each species by its
//! mean fitness, keeps every species champion unchanged, and fills the rest
//! of the next generation with mutated clones drawn from the fittest species.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::agent::Agent;
use super::brain::Perceptron;
use super::error::EvolutionError;
use super::params::Params;
use super::species::{self, Species};
use super::stats::{GenerationStats, StatsHistory};

/// Owns the population lifecycle and the shared random source.
#[derive(Debug, Clone)]
pub struct EvolutionManager {
    params: Params,
    generation_count: u32,
    /// Scratch buffer, valid only right after the latest speciation pass.
    species: Vec<Species>,
    history: StatsHistory,
    rng: StdRng,
}

impl EvolutionManager {
    /// Creates a manager from validated parameters.
    ///
    /// The random source is seeded from `params.seed` when present, which
    /// makes every random decision of the engine reproducible.
    pub fn new(params: Params) -> Result<Self, EvolutionError> {
        params.validate()?;

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            params,
            generation_count: 1,
            species: Vec::new(),
            history: StatsHistory::default(),
            rng,
        })
    }

    /// Creates a manager with default parameters and the given population size.
    pub fn with_population_size(population_size: usize) -> Result<Self, EvolutionError> {
        Self::new(Params {
            population_size,
            ..Params::default()
        })
    }

    /// Target number of agents per generation.
    pub fn population_size(&self) -> usize {
        self.params.population_size
    }

    /// Current generation, starting at 1.
    pub fn generation_count(&self) -> u32 {
        self.generation_count
    }

    /// Distance below which agents share a species.
    pub fn compatibility_threshold(&self) -> f32 {
        self.params.compatibility_threshold
    }

    /// Parameters the manager was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Species found by the most recent speciation pass.
    ///
    /// Member indices refer to the slice that pass was run on.
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Summaries of finished generations.
    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    /// The shared random source.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Builds a fresh population of random brains.
    pub fn spawn_population<A: Agent>(&mut self, mut factory: impl FnMut(Perceptron) -> A) -> Vec<A> {
        (0..self.params.population_size)
            .map(|_| factory(Perceptron::new_random(&mut self.rng)))
            .collect()
    }

    /// Rebuilds the species list from `agents`, in slice order.
    pub fn speciation<A: Agent>(&mut self, agents: &[A]) {
        self.species = species::speciate(agents, self.params.compatibility_threshold);
        debug!(
            agents = agents.len(),
            species = self.species.len(),
            "speciation complete"
        );
    }

    /// Re-speciates `agents` and writes each species' mean fitness onto its members.
    pub fn calculate_fitness<A: Agent>(&mut self, agents: &mut [A]) {
        self.speciation(agents);

        for species in &self.species {
            let mean = species.mean_fitness(agents);
            for &idx in species.members() {
                agents[idx].set_species_fitness(mean);
            }
        }
    }

    /// Produces the next generation from a finished one.
    ///
    /// Species are ranked by species fitness and members by individual
    /// fitness, both with stable sorts. Each species' top member is cloned
    /// unmutated, then mutated clones of random members of the top species
    /// fill the population. The result never exceeds the population size and
    /// is empty when `dead_agents` is.
    pub fn create_next_generation<A: Agent>(&mut self, dead_agents: &mut [A]) -> Vec<A> {
        self.calculate_fitness(dead_agents);
        let dead: &[A] = dead_agents;

        let stats = GenerationStats::collect(self.generation_count, dead, self.species.len());

        let mut ranked: Vec<Vec<usize>> = self
            .species
            .iter()
            .map(|s| {
                let mut members = s.members().to_vec();
                members.sort_by(|&a, &b| dead[b].fitness().total_cmp(&dead[a].fitness()));
                members
            })
            .collect();
        ranked.sort_by(|a, b| {
            dead[b[0]]
                .species_fitness()
                .total_cmp(&dead[a[0]].species_fitness())
        });

        let population_size = self.params.population_size;
        let mut next = Vec::with_capacity(population_size);

        for members in &ranked {
            if next.len() >= population_size {
                break;
            }
            let mut champion = dead[members[0]].clone();
            champion.reset();
            next.push(champion);
        }
        let champions = next.len();

        let parent_species = ranked.len().min(self.params.top_species);
        while next.len() < population_size && parent_species > 0 {
            let members = &ranked[self.rng.random_range(0..parent_species)];
            let parent = members[self.rng.random_range(0..members.len())];

            let mut child = dead[parent].clone();
            child.reset();
            child.brain_mut().mutate_with(
                &mut self.rng,
                self.params.mutation_rate,
                self.params.mutation_magnitude,
            );
            next.push(child);
        }

        if dead.is_empty() {
            warn!(
                generation = self.generation_count,
                "evolving an empty population, next generation is empty"
            );
        } else {
            info!(
                generation = self.generation_count,
                best = stats.best_fitness,
                mean = stats.mean_fitness,
                species = stats.species,
                champions,
                "generation complete"
            );
        }

        self.history.record(stats);
        self.generation_count += 1;
        next
    }
}
