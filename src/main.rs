use std::process::ExitCode;
use std::sync::Arc;

use neuroflap::simulation::agent::{Bird, Skin};
use neuroflap::simulation::course::Course;
use neuroflap::simulation::error::EvolutionError;
use neuroflap::simulation::evolution::EvolutionManager;
use neuroflap::simulation::params::Params;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), EvolutionError> {
    let params = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading parameters");
            Params::load_from_file(path)?
        }
        None => Params::default(),
    };

    let mut manager = EvolutionManager::new(params.clone())?;
    let skin = Arc::new(Skin::default());
    let start_y = params.course.height / 2.0;

    let mut birds = manager.spawn_population(|brain| Bird::new(brain, start_y, Arc::clone(&skin)));

    info!(
        population = params.population_size,
        generations = params.max_generations,
        "starting evolution"
    );

    for _ in 0..params.max_generations {
        if birds.is_empty() {
            info!("population died out, reseeding");
            birds = manager.spawn_population(|brain| Bird::new(brain, start_y, Arc::clone(&skin)));
        }

        let mut course = Course::new(&params.course, manager.rng());
        let steps = course.run_generation(&mut birds, params.max_steps, manager.rng())?;
        let best_pipes = birds.iter().map(|b| b.pipes_passed).max().unwrap_or(0);
        info!(
            generation = manager.generation_count(),
            steps,
            best_pipes,
            "course finished"
        );

        birds = manager.create_next_generation(&mut birds);
    }

    if let Some(best) = manager.history().best_ever() {
        info!(best, "evolution finished");
    }
    Ok(())
}
