//! Agents evolved by the engine.
//!
//! The engine only needs a small slice of an agent's state, captured by the
//! [`Agent`] trait. [`Bird`] is the agent flown through the obstacle course.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::brain::Perceptron;

/// Contract between an evolving entity and the evolution manager.
///
/// Cloning must duplicate the brain by value so that mutating a clone never
/// touches the original.
pub trait Agent: Clone {
    /// The agent's brain.
    fn brain(&self) -> &Perceptron;

    /// Mutable access to the agent's brain.
    fn brain_mut(&mut self) -> &mut Perceptron;

    /// Fitness accumulated by the simulation during the current generation.
    fn fitness(&self) -> f32;

    /// Mean fitness of the agent's species, as of the last fitness pass.
    fn species_fitness(&self) -> f32;

    /// Overwrites the species fitness. Only the evolution manager calls this.
    fn set_species_fitness(&mut self, value: f32);

    /// Clears fitness and any per-generation motion state.
    fn reset(&mut self);

    /// Compatibility distance between the brains of two agents.
    fn distance(&self, other: &Self) -> f32 {
        self.brain().distance(other.brain())
    }
}

/// Presentation data shared by every bird drawn with the same look.
///
/// The engine passes it along on clone but never reads or modifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    /// Sprite name used by a renderer.
    pub sprite: String,
    /// RGB tint.
    pub tint: [u8; 3],
}

impl Default for Skin {
    fn default() -> Self {
        Self {
            sprite: "bird".to_string(),
            tint: [255, 200, 0],
        }
    }
}

/// A bird controlled by a perceptron.
#[derive(Debug, Clone)]
pub struct Bird {
    /// Perceptron deciding when to flap.
    pub brain: Perceptron,
    /// Ticks survived plus pipe bonuses.
    pub fitness: f32,
    /// Mean fitness of this bird's species.
    pub species_fitness: f32,
    /// Cleared when the bird hits a pipe or leaves the screen.
    pub alive: bool,
    /// Vertical position of the bird's centre (0 is the top).
    pub y: f32,
    /// Vertical velocity (positive is downward).
    pub velocity: f32,
    /// Pipes cleared this generation.
    pub pipes_passed: u32,
    /// Shared presentation handle.
    pub skin: Arc<Skin>,
    start_y: f32,
}

impl Bird {
    /// Creates a live bird at `start_y` with the given brain.
    pub fn new(brain: Perceptron, start_y: f32, skin: Arc<Skin>) -> Self {
        Self {
            brain,
            fitness: 0.0,
            species_fitness: 0.0,
            alive: true,
            y: start_y,
            velocity: 0.0,
            pipes_passed: 0,
            skin,
            start_y,
        }
    }

    /// Marks the bird as dead.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Checks if the bird is still flying.
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Agent for Bird {
    fn brain(&self) -> &Perceptron {
        &self.brain
    }

    fn brain_mut(&mut self) -> &mut Perceptron {
        &mut self.brain
    }

    fn fitness(&self) -> f32 {
        self.fitness
    }

    fn species_fitness(&self) -> f32 {
        self.species_fitness
    }

    fn set_species_fitness(&mut self, value: f32) {
        self.species_fitness = value;
    }

    fn reset(&mut self) {
        self.fitness = 0.0;
        self.species_fitness = 0.0;
        self.alive = true;
        self.y = self.start_y;
        self.velocity = 0.0;
        self.pipes_passed = 0;
    }
}
