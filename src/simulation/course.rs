//! Headless obstacle course that flies birds and accumulates their fitness.
//!
//! Pipes scroll from right to left at a constant speed. Every tick each live
//! bird reads its sensors, asks its brain whether to flap, and falls under
//! gravity. Surviving a tick is worth one fitness point; clearing a pipe
//! adds a bonus.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Bird;
use super::error::EvolutionError;
use super::params::CourseParams;

/// Brain output above which a bird flaps.
const FLAP_THRESHOLD: f32 = 0.5;

/// A pipe pair with an opening between `gap_top` and `gap_bottom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge.
    pub x: f32,
    /// Lower edge of the upper pipe.
    pub gap_top: f32,
    /// Upper edge of the lower pipe.
    pub gap_bottom: f32,
    /// Set once the pipe has scrolled past the birds.
    pub passed: bool,
}

/// The scrolling course for one generation.
#[derive(Debug, Clone)]
pub struct Course {
    params: CourseParams,
    pipes: Vec<Pipe>,
    ticks: usize,
}

impl Course {
    /// Creates a course with its first pipe entering at the right edge.
    pub fn new<R: Rng + ?Sized>(params: &CourseParams, rng: &mut R) -> Self {
        let mut course = Self {
            params: params.clone(),
            pipes: Vec::new(),
            ticks: 0,
        };
        course.spawn_pipe(params.width, rng);
        course.refill(rng);
        course
    }

    /// Pipes currently on or approaching the screen, left to right.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// The first pipe the birds have not yet fully cleared.
    pub fn next_pipe(&self) -> Option<&Pipe> {
        let bird_left = self.params.bird_x - self.params.bird_radius;
        self.pipes
            .iter()
            .find(|pipe| pipe.x + self.params.pipe_width >= bird_left)
    }

    /// Normalized sensor readings followed by the bias term.
    ///
    /// `[distance to gap top, distance to pipe, distance to gap bottom, 1.0]`
    pub fn sensors(&self, bird: &Bird) -> [f32; 4] {
        let Some(pipe) = self.next_pipe() else {
            return [0.0, 0.0, 0.0, 1.0];
        };

        [
            (bird.y - pipe.gap_top) / self.params.height,
            (pipe.x - self.params.bird_x) / self.params.width,
            (pipe.gap_bottom - bird.y) / self.params.height,
            1.0,
        ]
    }

    /// Advances the course by one tick and returns the number of live birds.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        birds: &mut [Bird],
        rng: &mut R,
    ) -> Result<usize, EvolutionError> {
        self.ticks += 1;

        for pipe in &mut self.pipes {
            pipe.x -= self.params.pipe_speed;
        }

        for bird in birds.iter_mut().filter(|b| b.is_alive()) {
            let inputs = self.sensors(bird);
            if bird.brain.predict(&inputs)? > FLAP_THRESHOLD {
                bird.velocity = self.params.flap_velocity;
            }

            bird.velocity = (bird.velocity + self.params.gravity).min(self.params.max_fall_speed);
            bird.y += bird.velocity;
            bird.fitness += 1.0;

            if self.collides(bird) {
                bird.kill();
            }
        }

        let cleared = self.mark_passed();
        if cleared > 0 {
            for bird in birds.iter_mut().filter(|b| b.is_alive()) {
                bird.pipes_passed += cleared;
                bird.fitness += self.params.pipe_bonus * cleared as f32;
            }
        }

        self.pipes.retain(|pipe| pipe.x + self.params.pipe_width >= 0.0);
        self.refill(rng);

        Ok(birds.iter().filter(|b| b.is_alive()).count())
    }

    /// Steps until every bird is dead or `max_steps` ticks have run.
    ///
    /// Returns the number of ticks taken.
    pub fn run_generation<R: Rng + ?Sized>(
        &mut self,
        birds: &mut [Bird],
        max_steps: usize,
        rng: &mut R,
    ) -> Result<usize, EvolutionError> {
        let mut steps = 0;
        while steps < max_steps && birds.iter().any(Bird::is_alive) {
            self.step(birds, rng)?;
            steps += 1;
        }
        Ok(steps)
    }

    fn collides(&self, bird: &Bird) -> bool {
        let p = &self.params;
        let top = bird.y - p.bird_radius;
        let bottom = bird.y + p.bird_radius;

        if top < 0.0 || bottom > p.height {
            return true;
        }

        self.pipes.iter().any(|pipe| {
            let overlaps_x =
                p.bird_x + p.bird_radius > pipe.x && p.bird_x - p.bird_radius < pipe.x + p.pipe_width;
            overlaps_x && (top < pipe.gap_top || bottom > pipe.gap_bottom)
        })
    }

    /// Flags pipes whose right edge moved behind the birds.
    fn mark_passed(&mut self) -> u32 {
        let bird_left = self.params.bird_x - self.params.bird_radius;
        let mut cleared = 0;
        for pipe in self.pipes.iter_mut().filter(|pipe| !pipe.passed) {
            if pipe.x + self.params.pipe_width < bird_left {
                pipe.passed = true;
                cleared += 1;
            }
        }
        cleared
    }

    /// Keeps pipes queued up to one spacing past the right edge.
    fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        loop {
            let last_x = self.pipes.last().map_or(self.params.width, |pipe| pipe.x);
            if last_x >= self.params.width + self.params.pipe_spacing {
                break;
            }
            let next_x = last_x + self.params.pipe_spacing;
            // Spacing too small to register at this magnitude.
            if next_x <= last_x {
                break;
            }
            self.spawn_pipe(next_x, rng);
        }
    }

    fn spawn_pipe<R: Rng + ?Sized>(&mut self, x: f32, rng: &mut R) {
        let p = &self.params;
        let gap_top = rng.random_range(p.gap_margin..=p.height - p.gap_margin - p.gap_size);
        self.pipes.push(Pipe {
            x,
            gap_top,
            gap_bottom: gap_top + p.gap_size,
            passed: false,
        });
    }
}
