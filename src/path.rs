use crate::grid_world::GridWorld;
use crate::Cell;
use core::fmt;
use fxhash::FxHashSet;
use itertools::Itertools;

/// An ordered sequence of cells from start to goal, both inclusive. The empty path means that no
/// path exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn new(cells: Vec<Cell>) -> Path {
        Path { cells }
    }
    pub fn empty() -> Path {
        Path::default()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    /// Number of cells (waypoints) on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    /// Number of unit steps, zero for the empty path.
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn into_inner(self) -> Vec<Cell> {
        self.cells
    }

    /// Whether this is a non-empty path from the world's start to its goal that moves by unit
    /// axis-aligned steps over free cells without visiting a cell twice.
    pub fn is_valid_on(&self, world: &GridWorld) -> bool {
        let mut seen = FxHashSet::default();
        self.first() == Some(world.start())
            && self.last() == Some(world.goal())
            && self.cells.iter().all(|c| world.can_move_to(*c) && seen.insert(*c))
            && self
                .cells
                .iter()
                .tuple_windows()
                .all(|(a, b)| (a.x - b.x).abs() + (a.y - b.y).abs() == 1)
    }
}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Path {
        Path::new(cells)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<no path>")
        } else {
            write!(
                f,
                "{}",
                self.cells
                    .iter()
                    .map(|c| format!("({}, {})", c.x, c.y))
                    .join(" -> ")
            )
        }
    }
}
