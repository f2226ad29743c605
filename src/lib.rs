//! # Neuroflap - Neuroevolution of Perceptron-Controlled Birds
//!
//! A population of birds, each steered by a single-layer perceptron, learns to
//! fly through a pipe course by evolution rather than training.
//!
//! ## Features
//!
//! - Single-layer perceptron brains with saturating logistic output
//! - Greedy speciation by summed absolute weight distance
//! - Species fitness sharing, champion preservation, and mutation
//! - Reproducible runs from a single seeded random source
//! - Headless pipe course for evaluating populations
//! - JSON configuration
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Perceptron implementation
//! - [`simulation::agent`] - Agent contract and the bird agent
//! - [`simulation::species`] - Species grouping
//! - [`simulation::evolution`] - Generation transitions
//! - [`simulation::course`] - Headless obstacle course

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agent contract and the bird agent.
    pub mod agent;
    /// Perceptron brain.
    pub mod brain;
    /// Headless pipe course that accumulates fitness.
    pub mod course;
    /// Error types.
    pub mod error;
    /// Speciation, fitness sharing, and reproduction.
    pub mod evolution;
    /// Evolution and course parameters.
    pub mod params;
    /// Ephemeral species groups.
    pub mod species;
    /// Per-generation statistics.
    pub mod stats;
}
