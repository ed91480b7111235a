use crate::config::{validate_drone_speed, SimulationConfig};
use crate::drone::Drone;
use crate::error::Result;
use crate::grid_world::GridWorld;
use crate::path::Path;
use crate::solver::{astar::AstarSolver, GridSolver};
use crate::Cell;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_cell<R: Rng>(size: usize, rng: &mut R) -> Cell {
    Cell::new(
        rng.gen_range(0..size) as i32,
        rng.gen_range(0..size) as i32,
    )
}

/// Generates a random world: a start cell, a distinct goal cell and
/// [obstacle_draws](SimulationConfig::obstacle_draws) random obstacle placements, skipping draws
/// that land on the start or the goal.
pub fn generate_world<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Result<GridWorld> {
    config.validate()?;
    let size = config.grid_size;
    let start = random_cell(size, rng);
    let mut goal = random_cell(size, rng);
    while goal == start {
        goal = random_cell(size, rng);
    }
    let mut world = GridWorld::new(size, start, goal)?;
    for _ in 0..config.obstacle_draws() {
        let cell = random_cell(size, rng);
        if cell != start && cell != goal {
            world.set_blocked(cell, true)?;
        }
    }
    world.update();
    debug!(
        "Generated {}x{} world with {} obstacles, start {} goal {}",
        size,
        size,
        world.blocked_count(),
        start,
        goal
    );
    Ok(world)
}

/// One run of the simulation: a world, the path computed on it once and a drone following it.
#[derive(Clone, Debug)]
pub struct Episode {
    pub world: GridWorld,
    pub path: Path,
    pub drone: Drone,
}

impl Episode {
    pub fn new<S: GridSolver>(world: GridWorld, solver: &S, drone_speed: f32) -> Result<Episode> {
        validate_drone_speed(drone_speed)?;
        let path = solver.find_episode_path(&world)?;
        let drone = Drone::new(&path, drone_speed);
        Ok(Episode { world, path, drone })
    }

    pub fn generate<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Result<Episode> {
        let world = generate_world(config, rng)?;
        Episode::new(world, &AstarSolver::new(), config.drone_speed)
    }

    pub fn tick(&mut self) {
        self.drone.update(&self.path);
    }

    pub fn is_finished(&self) -> bool {
        self.drone.is_finished(&self.path)
    }
}

/// Drives consecutive episodes. A reset discards the current world and path entirely.
pub struct Simulator<R: Rng = StdRng> {
    config: SimulationConfig,
    rng: R,
    episode: Episode,
}

impl Simulator<StdRng> {
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self> {
        Simulator::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulator<R> {
    pub fn new(config: SimulationConfig, mut rng: R) -> Result<Self> {
        let episode = Episode::generate(&config, &mut rng)?;
        Ok(Simulator {
            config,
            rng,
            episode,
        })
    }

    pub fn reset(&mut self) -> Result<()> {
        self.episode = Episode::generate(&self.config, &mut self.rng)?;
        Ok(())
    }

    pub fn tick(&mut self) {
        self.episode.tick();
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
