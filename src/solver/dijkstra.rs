use crate::{grid_world::GridWorld, solver::GridSolver, Cell};

use super::unit_cost_neighbours;

/// Uninformed search; on a unit-cost grid this expands cells in breadth-first order.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = Vec<(Cell, i32)>;

    fn successors(&self, world: &GridWorld, node: &Cell) -> Self::Successors {
        unit_cost_neighbours(world, node)
    }

    fn heuristic(&self, _: &Cell, _: &Cell) -> i32 {
        0
    }
}
