//! Single-layer perceptron used as the bird brain.
//!
//! Three sensor readings plus a caller-supplied bias term are weighted,
//! summed, and squashed through a logistic function into a flap decision.

use ndarray::{Array1, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::EvolutionError;

/// Number of inputs a perceptron accepts (3 sensors + 1 bias).
pub const INPUT_SIZE: usize = 4;

/// Per-weight probability of being perturbed by [`Perceptron::mutate`].
pub const MUTATION_RATE: f32 = 0.1;

/// Maximum absolute perturbation added to a selected weight.
pub const MUTATION_MAGNITUDE: f32 = 0.5;

/// Beyond this magnitude `exp` leaves the f32 range, so the sigmoid saturates.
const SATURATION: f32 = 88.0;

/// A single-layer perceptron with a fixed weight vector in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perceptron {
    weights: Array1<f32>,
}

impl Perceptron {
    /// Creates a perceptron with weights drawn uniformly from `[-1, 1]`.
    pub fn new_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            weights: Array1::from_shape_fn(INPUT_SIZE, |_| rng.random_range(-1.0..=1.0)),
        }
    }

    /// Creates a perceptron from explicit weights, clamped into `[-1, 1]`.
    pub fn from_weights(weights: [f32; INPUT_SIZE]) -> Self {
        Self {
            weights: Array1::from_iter(weights.into_iter().map(|w| w.clamp(-1.0, 1.0))),
        }
    }

    /// Read-only view of the weights, in input order.
    pub fn weights(&self) -> &Array1<f32> {
        &self.weights
    }

    /// Computes the squashed dot product of `inputs` and the weights.
    ///
    /// `inputs` must hold exactly [`INPUT_SIZE`] values, the last of which is
    /// the bias term (conventionally `1.0`).
    pub fn predict(&self, inputs: &[f32]) -> Result<f32, EvolutionError> {
        if inputs.len() != INPUT_SIZE {
            return Err(EvolutionError::InvalidInput {
                expected: INPUT_SIZE,
                actual: inputs.len(),
            });
        }

        let weighted_sum = ArrayView1::from(inputs).dot(&self.weights);
        Ok(sigmoid(weighted_sum))
    }

    /// Perturbs weights using the default rate and magnitude.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.mutate_with(rng, MUTATION_RATE, MUTATION_MAGNITUDE);
    }

    /// Perturbs each weight independently.
    ///
    /// With probability `rate` a weight receives a uniform offset in
    /// `[-magnitude, magnitude]` and is clamped back into `[-1, 1]`.
    /// Weights that are not selected stay bit-for-bit unchanged.
    pub fn mutate_with<R: Rng + ?Sized>(&mut self, rng: &mut R, rate: f32, magnitude: f32) {
        for weight in self.weights.iter_mut() {
            if rng.random::<f32>() < rate {
                let offset = rng.random_range(-magnitude..=magnitude);
                *weight = (*weight + offset).clamp(-1.0, 1.0);
            }
        }
    }

    /// Sum of absolute weight differences between two perceptrons.
    pub fn distance(&self, other: &Perceptron) -> f32 {
        self.weights
            .iter()
            .zip(other.weights.iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

/// Logistic function that saturates instead of overflowing.
fn sigmoid(x: f32) -> f32 {
    if x < -SATURATION {
        0.0
    } else if x > SATURATION {
        1.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}
