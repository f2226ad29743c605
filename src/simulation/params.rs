//! Evolution and course parameters, with validation and JSON file helpers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::brain::{MUTATION_MAGNITUDE, MUTATION_RATE};
use super::error::EvolutionError;

/// Parameters controlling evolution and the headless driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Target number of agents in every generation.
    pub population_size: usize,
    /// Brain distance below which two agents share a species.
    pub compatibility_threshold: f32,
    /// Per-weight mutation probability during reproduction.
    pub mutation_rate: f32,
    /// Maximum absolute weight perturbation during reproduction.
    pub mutation_magnitude: f32,
    /// Number of fittest species eligible as parents.
    pub top_species: usize,
    /// Seed for the shared random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Generations run by the driver before stopping.
    pub max_generations: u32,
    /// Tick cap for a single generation on the course.
    pub max_steps: usize,
    /// Obstacle course geometry and physics.
    pub course: CourseParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 50,
            compatibility_threshold: 0.5,
            mutation_rate: MUTATION_RATE,
            mutation_magnitude: MUTATION_MAGNITUDE,
            top_species: 3,
            seed: None,
            max_generations: 50,
            max_steps: 5000,
            course: CourseParams::default(),
        }
    }
}

/// Geometry and physics of the obstacle course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseParams {
    /// Course width in pixels.
    pub width: f32,
    /// Course height in pixels.
    pub height: f32,
    /// Horizontal position of every bird.
    pub bird_x: f32,
    /// Collision radius of a bird.
    pub bird_radius: f32,
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Velocity set by a flap (negative is upward).
    pub flap_velocity: f32,
    /// Terminal falling speed.
    pub max_fall_speed: f32,
    /// Horizontal pipe speed per tick.
    pub pipe_speed: f32,
    /// Pipe width.
    pub pipe_width: f32,
    /// Vertical size of the opening between the pipe halves.
    pub gap_size: f32,
    /// Distance between consecutive pipes.
    pub pipe_spacing: f32,
    /// Minimum distance between a gap and the top or bottom edge.
    pub gap_margin: f32,
    /// Fitness bonus for each pipe cleared.
    pub pipe_bonus: f32,
}

impl Default for CourseParams {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 800.0,
            bird_x: 100.0,
            bird_radius: 12.0,
            gravity: 0.5,
            flap_velocity: -8.0,
            max_fall_speed: 10.0,
            pipe_speed: 4.0,
            pipe_width: 70.0,
            gap_size: 180.0,
            pipe_spacing: 260.0,
            gap_margin: 60.0,
            pipe_bonus: 50.0,
        }
    }
}

impl Params {
    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be positive"));
        }
        if !is_positive(self.compatibility_threshold) {
            return Err(invalid("compatibility_threshold must be positive"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must lie in [0, 1]"));
        }
        if self.mutation_magnitude.is_nan() || self.mutation_magnitude < 0.0 {
            return Err(invalid("mutation_magnitude must not be negative"));
        }
        if !(2.0 * self.mutation_magnitude).is_finite() {
            return Err(invalid("mutation_magnitude must be finite"));
        }
        if self.top_species == 0 {
            return Err(invalid("top_species must be positive"));
        }
        self.course.validate()
    }

    /// Loads parameters from a JSON file. Missing fields take defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, EvolutionError> {
        let json = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), EvolutionError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl CourseParams {
    /// Checks that the course geometry leaves room to fly.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        let values = [
            self.width,
            self.height,
            self.bird_x,
            self.bird_radius,
            self.gravity,
            self.flap_velocity,
            self.max_fall_speed,
            self.pipe_speed,
            self.pipe_width,
            self.gap_size,
            self.pipe_spacing,
            self.gap_margin,
            self.pipe_bonus,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(invalid("course values must be finite"));
        }
        if !(is_positive(self.width) && is_positive(self.height)) {
            return Err(invalid("course dimensions must be positive"));
        }
        if !(is_positive(self.bird_x) && is_positive(self.width - self.bird_x)) {
            return Err(invalid("bird_x must lie inside the course"));
        }
        if !is_positive(self.pipe_speed) {
            return Err(invalid("pipe_speed must be positive"));
        }
        if !is_positive(self.pipe_width) {
            return Err(invalid("pipe_width must be positive"));
        }
        if !is_positive(self.pipe_spacing - self.pipe_width) {
            return Err(invalid("pipe_spacing must exceed pipe_width"));
        }
        if !is_positive(self.gap_size - 2.0 * self.bird_radius) {
            return Err(invalid("gap_size must fit a bird"));
        }
        if self.gap_margin < 0.0 {
            return Err(invalid("gap_margin must not be negative"));
        }
        if self.gap_size + 2.0 * self.gap_margin > self.height {
            return Err(invalid("gap_size plus margins exceeds course height"));
        }
        Ok(())
    }
}

/// `false` for NaN as well as non-positive values.
fn is_positive(value: f32) -> bool {
    value > 0.0
}

fn invalid(reason: &str) -> EvolutionError {
    EvolutionError::InvalidParams(reason.to_string())
}
