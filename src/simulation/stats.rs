//! Per-generation fitness summaries and a bounded history of them.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::agent::Agent;

/// Summary of a finished generation, taken just before reproduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation the summary describes.
    pub generation: u32,
    /// Agents that took part.
    pub population: usize,
    /// Species found by the fitness pass.
    pub species: usize,
    /// Highest individual fitness.
    pub best_fitness: f32,
    /// Mean individual fitness.
    pub mean_fitness: f32,
    /// Highest species fitness.
    pub best_species_fitness: f32,
}

impl GenerationStats {
    /// Summarizes `agents` after a fitness pass found `species` groups.
    pub fn collect<A: Agent>(generation: u32, agents: &[A], species: usize) -> Self {
        if agents.is_empty() {
            return Self {
                generation,
                population: 0,
                species,
                best_fitness: 0.0,
                mean_fitness: 0.0,
                best_species_fitness: 0.0,
            };
        }

        let best_fitness = agents
            .iter()
            .map(A::fitness)
            .fold(f32::NEG_INFINITY, f32::max);
        let best_species_fitness = agents
            .iter()
            .map(A::species_fitness)
            .fold(f32::NEG_INFINITY, f32::max);
        let total: f32 = agents.iter().map(A::fitness).sum();

        Self {
            generation,
            population: agents.len(),
            species,
            best_fitness,
            mean_fitness: total / agents.len() as f32,
            best_species_fitness,
        }
    }
}

/// Bounded record of recent generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsHistory {
    /// Recent generations, oldest first.
    pub entries: VecDeque<GenerationStats>,
    /// Maximum number of generations to keep
    pub max_history: usize,
    best_ever: Option<f32>,
}

impl Default for StatsHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StatsHistory {
    /// Creates an empty history keeping at most `max_history` entries.
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_history),
            max_history,
            best_ever: None,
        }
    }

    /// Appends a generation, dropping the oldest entry when full.
    pub fn record(&mut self, stats: GenerationStats) {
        if stats.population > 0 {
            self.best_ever = Some(
                self.best_ever
                    .map_or(stats.best_fitness, |best| best.max(stats.best_fitness)),
            );
        }

        self.entries.push_back(stats);
        while self.entries.len() > self.max_history {
            self.entries.pop_front();
        }
    }

    /// Most recently recorded generation.
    pub fn latest(&self) -> Option<&GenerationStats> {
        self.entries.back()
    }

    /// Best individual fitness seen, including evicted entries.
    pub fn best_ever(&self) -> Option<f32> {
        self.best_ever
    }

    /// Number of generations currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
