use crate::{grid_world::GridWorld, solver::GridSolver, Cell};

use super::{unit_cost_neighbours, STEP_COST};

/// A* guided by the Manhattan distance, which is consistent on a 4-connected unit-cost grid and
/// therefore yields shortest paths.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Successors = Vec<(Cell, i32)>;

    fn successors(&self, world: &GridWorld, node: &Cell) -> Self::Successors {
        unit_cost_neighbours(world, node)
    }

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> i32 {
        ((p1.x - p2.x).abs() + (p1.y - p2.y).abs()) * STEP_COST
    }
}
