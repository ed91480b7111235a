//! # drone_pathfinding
//!
//! Shortest paths on a square, 4-connected occupancy grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Every move
//! has unit cost, so the returned path has the minimum number of steps. Connected components of
//! the free cells are pre-computed to avoid flood-filling behaviour if no path exists.
//!
//! A simulation episode generates a random [GridWorld] from an injectable random source, computes
//! the path between its start and goal once, and lets a [Drone] follow the waypoints of that
//! path tick by tick.
//!
//! ```
//! use drone_pathfinding::{AstarSolver, Cell, GridSolver, GridWorld};
//!
//! let world = GridWorld::new(5, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
//! let path = AstarSolver::new().find_episode_path(&world).unwrap();
//! assert_eq!(path.cost(), 8);
//! ```
pub mod astar;
pub mod config;
pub mod drone;
pub mod episode;
pub mod error;
pub mod grid_world;
pub mod path;
pub mod solver;

/// Integer grid coordinate.
pub type Cell = grid_util::point::Point;

pub use config::SimulationConfig;
pub use drone::{Drone, Vec2};
pub use episode::{generate_world, Episode, Simulator};
pub use error::{Error, Result};
pub use grid_world::GridWorld;
pub use path::Path;
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const DEFAULT_OBSTACLE_DENSITY: f64 = 0.2;
pub const DEFAULT_DRONE_SPEED: f32 = 0.1;
/// Largest supported grid side length.
pub const MAX_GRID_SIZE: usize = 4096;
