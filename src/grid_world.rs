use crate::error::{Error, Result};
use crate::{Cell, MAX_GRID_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use log::info;
use petgraph::unionfind::UnionFind;

/// Offsets of the 4-neighborhood in the order in which neighbours are produced: left, right, up,
/// down. The order only decides which of several shortest paths a search returns.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// [GridWorld] is the static search space of one episode: a square [BoolGrid] in which a cell is
/// either occupied ([true]) or free ([false]), together with a start and a goal cell. Connected
/// components of free cells are kept in a [UnionFind] structure so that unreachable goals can be
/// detected without flood-filling.
///
/// Start and goal are always distinct and never occupied.
#[derive(Clone, Debug)]
pub struct GridWorld {
    grid: BoolGrid,
    size: usize,
    start: Cell,
    goal: Cell,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl GridWorld {
    /// Creates an obstacle-free world of `size` x `size` cells, with `size` at most
    /// [MAX_GRID_SIZE].
    pub fn new(size: usize, start: Cell, goal: Cell) -> Result<GridWorld> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(Error::InvalidSize(size));
        }
        let mut world = GridWorld {
            grid: BoolGrid::new(size, size, false),
            size,
            start,
            goal,
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        world.check_in_bounds(start)?;
        world.check_in_bounds(goal)?;
        if start == goal {
            return Err(Error::StartEqualsGoal(start));
        }
        world.generate_components();
        Ok(world)
    }

    /// Parses a square map where `.` is free, `#` is blocked, `S` marks the start and `G` the
    /// goal. Whitespace around rows is ignored.
    ///
    /// ```
    /// use drone_pathfinding::GridWorld;
    ///
    /// let world = GridWorld::from_ascii(
    ///     "S..
    ///      .##
    ///      G..",
    /// )
    /// .unwrap();
    /// assert_eq!(world.size(), 3);
    /// assert_eq!(world.blocked_count(), 2);
    /// ```
    pub fn from_ascii(map: &str) -> Result<GridWorld> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let size = rows.len();
        let mut start = None;
        let mut goal = None;
        let mut blocked = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(Error::InvalidMap(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    size
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                match c {
                    '.' => {}
                    '#' => blocked.push(cell),
                    'S' if start.is_none() => start = Some(cell),
                    'G' if goal.is_none() => goal = Some(cell),
                    'S' | 'G' => {
                        return Err(Error::InvalidMap(format!("duplicate '{}' at {}", c, cell)))
                    }
                    _ => {
                        return Err(Error::InvalidMap(format!(
                            "unknown character '{}' at {}",
                            c, cell
                        )))
                    }
                }
            }
        }
        let start = start.ok_or_else(|| Error::InvalidMap("missing start 'S'".to_owned()))?;
        let goal = goal.ok_or_else(|| Error::InvalidMap("missing goal 'G'".to_owned()))?;
        let mut world = GridWorld::new(size, start, goal)?;
        for cell in blocked {
            world.set_blocked(cell, true)?;
        }
        world.update();
        Ok(world)
    }

    pub fn size(&self) -> usize {
        self.size
    }
    pub fn start(&self) -> Cell {
        self.start
    }
    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        let n = self.size as i32;
        cell.x >= 0 && cell.y >= 0 && cell.x < n && cell.y < n
    }

    pub(crate) fn check_in_bounds(&self, cell: Cell) -> Result<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    /// Occupancy of an in-bounds cell. Out-of-range cells are an error rather than implicitly
    /// blocked.
    pub fn is_blocked(&self, cell: Cell) -> Result<bool> {
        self.check_in_bounds(cell)?;
        Ok(self.grid.get(cell.x, cell.y))
    }

    /// True if the cell is inside the grid and free.
    pub fn can_move_to(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.grid.get(cell.x, cell.y)
    }

    /// The free, in-bounds cells of the 4-neighborhood of `cell`, ordered as
    /// [NEIGHBOUR_OFFSETS].
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Cell::new(cell.x + dx, cell.y + dy))
            .filter(|n| self.can_move_to(*n))
            .collect()
    }

    /// Updates a cell while an episode is being set up. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken apart into multiple.
    /// The start and goal can never be blocked.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> Result<()> {
        self.check_in_bounds(cell)?;
        if blocked && (cell == self.start || cell == self.goal) {
            return Err(Error::BlockedEndpoint(cell));
        }
        if blocked {
            if !self.grid.get(cell.x, cell.y) {
                self.components_dirty = true;
            }
        } else {
            let ix = self.ix(cell);
            for n in self.neighbors(cell) {
                let n_ix = self.ix(n);
                self.components.union(ix, n_ix);
            }
        }
        self.grid.set(cell.x, cell.y, blocked);
        Ok(())
    }

    pub fn blocked_count(&self) -> usize {
        self.cells().filter(|c| self.grid.get(c.x, c.y)).count()
    }

    /// All cells of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Cell::new(x, y)))
    }

    fn ix(&self, cell: Cell) -> usize {
        cell.y as usize * self.size + cell.x as usize
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, cell: Cell) -> usize {
        self.components.find(self.ix(cell))
    }

    /// Checks if `a` and `b` are free cells on the same connected component.
    pub fn reachable(&self, a: Cell, b: Cell) -> bool {
        !self.unreachable(a, b)
    }

    /// Checks if `a` and `b` are not on the same component. Out-of-bounds or blocked cells are
    /// unreachable.
    pub fn unreachable(&self, a: Cell, b: Cell) -> bool {
        if self.can_move_to(a) && self.can_move_to(b) {
            !self.components.equiv(self.ix(a), self.ix(b))
        } else {
            true
        }
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free 4-neighbours to the same
    /// components. Only the right and lower neighbours need to be visited.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.size * self.size);
        self.components_dirty = false;
        for cell in self.cells() {
            if !self.can_move_to(cell) {
                continue;
            }
            let parent_ix = self.ix(cell);
            for n in [Cell::new(cell.x + 1, cell.y), Cell::new(cell.x, cell.y + 1)] {
                if self.can_move_to(n) {
                    let ix = self.ix(n);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                let cell = Cell::new(x, y);
                let c = if cell == self.start {
                    'S'
                } else if cell == self.goal {
                    'G'
                } else if self.grid.get(x, y) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether cells are correctly mapped to different connected components.
    #[test]
    fn test_component_generation() {
        //  ___
        // |S#.|
        // |.#G|
        //  ___
        let world = GridWorld::from_ascii(
            "S#.
             .#G
             ...",
        )
        .unwrap();
        assert!(world.reachable(Cell::new(0, 0), Cell::new(2, 1)));
        let walled = GridWorld::from_ascii(
            "S#.
             .#G
             .#.",
        )
        .unwrap();
        assert!(walled.unreachable(Cell::new(0, 0), Cell::new(2, 1)));
        assert!(walled.reachable(Cell::new(0, 0), Cell::new(0, 2)));
        assert_ne!(
            walled.get_component(Cell::new(0, 0)),
            walled.get_component(Cell::new(2, 0))
        );
    }

    #[test]
    fn neighbour_order_is_left_right_up_down() {
        let world = GridWorld::new(3, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(
            world.neighbors(Cell::new(1, 1)),
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn neighbours_skip_bounds_and_obstacles() {
        let mut world = GridWorld::new(3, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        world.set_blocked(Cell::new(1, 0), true).unwrap();
        assert_eq!(world.neighbors(Cell::new(0, 0)), vec![Cell::new(0, 1)]);
        assert!(world.neighbors(Cell::new(5, 5)).is_empty());
    }

    #[test]
    fn is_blocked_rejects_out_of_bounds() {
        let world = GridWorld::new(2, Cell::new(0, 0), Cell::new(1, 1)).unwrap();
        assert_eq!(world.is_blocked(Cell::new(1, 0)), Ok(false));
        assert_eq!(
            world.is_blocked(Cell::new(-1, 0)),
            Err(Error::OutOfBounds {
                cell: Cell::new(-1, 0),
                size: 2
            })
        );
        assert!(world.is_blocked(Cell::new(0, 2)).is_err());
    }

    #[test]
    fn endpoints_cannot_be_blocked() {
        let mut world = GridWorld::new(3, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(
            world.set_blocked(Cell::new(0, 0), true),
            Err(Error::BlockedEndpoint(Cell::new(0, 0)))
        );
        assert!(world.set_blocked(Cell::new(2, 2), true).is_err());
        assert_eq!(world.blocked_count(), 0);
    }

    #[test]
    fn invalid_construction() {
        assert_eq!(
            GridWorld::new(0, Cell::new(0, 0), Cell::new(0, 0)).unwrap_err(),
            Error::InvalidSize(0)
        );
        assert_eq!(
            GridWorld::new(3, Cell::new(1, 1), Cell::new(1, 1)).unwrap_err(),
            Error::StartEqualsGoal(Cell::new(1, 1))
        );
        assert!(GridWorld::new(3, Cell::new(0, 0), Cell::new(3, 0)).is_err());
        assert_eq!(
            GridWorld::new(MAX_GRID_SIZE + 1, Cell::new(0, 0), Cell::new(1, 0)).unwrap_err(),
            Error::InvalidSize(MAX_GRID_SIZE + 1)
        );
    }

    #[test]
    fn from_ascii_blocks_leading_cells() {
        let world = GridWorld::from_ascii("S..\n.##\nG..").unwrap();
        assert_eq!(world.blocked_count(), 2);
        assert_eq!(world.is_blocked(Cell::new(1, 1)), Ok(true));
        assert_eq!(world.is_blocked(Cell::new(0, 1)), Ok(false));
        let world = GridWorld::from_ascii("S..\n##.\nG..").unwrap();
        assert_eq!(world.is_blocked(Cell::new(0, 1)), Ok(true));
    }

    #[test]
    fn invalid_maps() {
        assert!(matches!(
            GridWorld::from_ascii("S.\n.").unwrap_err(),
            Error::InvalidMap(_)
        ));
        assert!(matches!(
            GridWorld::from_ascii("S.\n..").unwrap_err(),
            Error::InvalidMap(_)
        ));
        assert!(matches!(
            GridWorld::from_ascii("SS\n.G").unwrap_err(),
            Error::InvalidMap(_)
        ));
        assert!(matches!(
            GridWorld::from_ascii("S?\n.G").unwrap_err(),
            Error::InvalidMap(_)
        ));
    }

    /// Blocking a cell that splits a corridor marks the components dirty until updated.
    #[test]
    fn blocking_marks_components_dirty() {
        let mut world = GridWorld::new(3, Cell::new(0, 0), Cell::new(2, 0)).unwrap();
        for y in 0..3 {
            world.set_blocked(Cell::new(1, y), true).unwrap();
        }
        assert!(world.components_dirty());
        world.update();
        assert!(!world.components_dirty());
        assert!(world.unreachable(world.start(), world.goal()));
        world.set_blocked(Cell::new(1, 1), false).unwrap();
        assert!(world.reachable(world.start(), world.goal()));
    }

    #[test]
    fn display_round_trips_ascii() {
        let map = "S..\n.#.\n..G\n";
        let world = GridWorld::from_ascii(map).unwrap();
        assert_eq!(world.to_string(), map);
    }
}
