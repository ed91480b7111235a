use crate::astar::astar;
use crate::error::{Error, Result};
use crate::grid_world::GridWorld;
use crate::path::Path;
use crate::Cell;
use log::{debug, info, warn};

pub mod astar;
pub mod dijkstra;

/// Every move on the 4-connected grid costs the same.
pub const STEP_COST: i32 = 1;

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Cell, i32)>;

    /// Estimated remaining cost from `p1` to `p2`.
    fn heuristic(&self, p1: &Cell, p2: &Cell) -> i32;

    fn successors(&self, world: &GridWorld, node: &Cell) -> Self::Successors;

    /// Computes a minimum-length path from `start` to `goal`.
    ///
    /// Both endpoints must be free cells inside the world, otherwise an error is returned. A goal
    /// that cannot be reached yields the empty [Path], which is an expected outcome rather than
    /// an error. Among several shortest paths, the one returned depends on the expansion order
    /// and should not be relied upon.
    fn find_path(&self, world: &GridWorld, start: Cell, goal: Cell) -> Result<Path> {
        for endpoint in [start, goal] {
            if world.is_blocked(endpoint)? {
                return Err(Error::BlockedEndpoint(endpoint));
            }
        }
        if start == goal {
            return Ok(Path::new(vec![start]));
        }
        // Check if start and goal are on the same connected component.
        if !world.components_dirty() && world.unreachable(start, goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(Path::empty());
        }
        let result = astar(
            &start,
            |node| self.successors(world, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        match result {
            Some((cells, cost)) => {
                debug!("Found path from {} to {} with cost {}", start, goal, cost);
                Ok(Path::new(cells))
            }
            None => {
                if !world.components_dirty() {
                    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
                }
                Ok(Path::empty())
            }
        }
    }

    /// [find_path](Self::find_path) between the world's own start and goal.
    fn find_episode_path(&self, world: &GridWorld) -> Result<Path> {
        self.find_path(world, world.start(), world.goal())
    }

    fn path_cost(&self, path: &Path) -> i32 {
        path.cost() as i32 * STEP_COST
    }
}

/// Shared successor function: the free 4-neighbours of `node`, each at [STEP_COST].
pub(crate) fn unit_cost_neighbours(world: &GridWorld, node: &Cell) -> Vec<(Cell, i32)> {
    world
        .neighbors(*node)
        .into_iter()
        .map(|n| (n, STEP_COST))
        .collect()
}
