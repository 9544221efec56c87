pub mod cell;
pub mod grid;

pub use cell::{CellId, CellState, Direction};
pub use grid::Grid;

use crate::error::{MazeError, Result};

/// A carved passage, recorded in the direction the walk took it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: CellId,
    pub to: CellId,
}

impl Edge {
    pub fn new(from: CellId, to: CellId) -> Self {
        Edge { from, to }
    }

    /// The same passage with endpoints ordered `(smaller, larger)`.
    pub fn normalized(self) -> (CellId, CellId) {
        (self.from.min(self.to), self.from.max(self.to))
    }
}

impl From<(CellId, CellId)> for Edge {
    fn from((from, to): (CellId, CellId)) -> Self {
        Edge { from, to }
    }
}

/// Undirected passage graph over the cells of a [`Grid`].
///
/// Every cell is a node from the start; an edge exists iff the wall between
/// two adjacent cells has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    /// Open neighbours per cell, indexed by `cell - 1`
    passages: Box<[Vec<CellId>]>,
    edge_count: usize,
}

impl Maze {
    /// Creates a maze with every wall standing.
    pub fn new(grid: Grid) -> Self {
        let passages = vec![Vec::new(); grid.cell_count()].into_boxed_slice();
        Maze {
            grid,
            passages,
            edge_count: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Side length in cells.
    pub fn side(&self) -> usize {
        self.grid.side()
    }

    pub fn node_count(&self) -> usize {
        self.grid.cell_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Removes the wall between `from` and `to`.
    ///
    /// # Returns
    /// `true` if a wall was removed, `false` if the passage was already open.
    ///
    /// # Errors
    /// * `InvalidCell` if either id is outside the grid
    /// * `NotAdjacent` if the cells do not share a wall
    pub fn carve(&mut self, from: CellId, to: CellId) -> Result<bool> {
        self.grid.check(from)?;
        self.grid.check(to)?;
        if !self.grid.are_adjacent(from, to) {
            return Err(MazeError::NotAdjacent { from, to });
        }
        if self.has_passage(from, to) {
            return Ok(false);
        }
        self.open_passage(from, to);
        Ok(true)
    }

    /// Links two cells already known to be valid, distinct neighbours.
    pub(crate) fn open_passage(&mut self, from: CellId, to: CellId) {
        debug_assert!(self.grid.are_adjacent(from, to));
        let (i, j) = (self.grid.ravel_index(from), self.grid.ravel_index(to));
        self.passages[i].push(to);
        self.passages[j].push(from);
        self.edge_count += 1;
    }

    /// Whether the wall between `p` and `q` has been removed.
    /// Unknown ids simply have no passages.
    pub fn has_passage(&self, p: CellId, q: CellId) -> bool {
        self.grid.contains(p) && self.passages[self.grid.ravel_index(p)].contains(&q)
    }

    /// Cells reachable from `cell` in one step, in carve order.
    pub fn passages(&self, cell: CellId) -> Result<&[CellId]> {
        let cell = self.grid.check(cell)?;
        Ok(&self.passages[self.grid.ravel_index(cell)])
    }

    /// Every open passage once, as `(smaller, larger)` pairs in ascending order.
    pub fn edges(&self) -> Vec<(CellId, CellId)> {
        let mut edges = (1..=self.node_count())
            .flat_map(|p| {
                self.passages[self.grid.ravel_index(p)]
                    .iter()
                    .filter(move |&&q| p < q)
                    .map(move |&q| (p, q))
            })
            .collect::<Vec<_>>();
        edges.sort_unstable();
        edges
    }

    /// Whether the wall to the right of `cell` is still standing.
    /// The outer boundary always counts as a wall.
    pub fn is_wall_right(&self, cell: CellId) -> bool {
        match self.grid.coords(cell) {
            Ok((row, col)) => match self.grid.cell_at(row, col + 1) {
                Some(right) => !self.has_passage(cell, right),
                None => true,
            },
            Err(_) => true,
        }
    }

    /// Whether the wall below `cell` is still standing.
    /// The outer boundary always counts as a wall.
    pub fn is_wall_below(&self, cell: CellId) -> bool {
        match self.grid.coords(cell) {
            Ok((row, col)) => match self.grid.cell_at(row + 1, col) {
                Some(below) => !self.has_passage(cell, below),
                None => true,
            },
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(side: usize) -> Maze {
        Maze::new(Grid::new(side).unwrap())
    }

    #[test]
    fn test_new_maze_has_no_passages() {
        let maze = maze(3);
        assert_eq!(maze.node_count(), 9);
        assert_eq!(maze.edge_count(), 0);
        assert!(maze.edges().is_empty());
        assert!((1..=9).all(|c| maze.passages(c).unwrap().is_empty()));
    }

    #[test]
    fn test_carve() {
        let mut maze = maze(3);
        assert_eq!(maze.carve(1, 2), Ok(true));
        // Trying to carve the same passage again should return false
        assert_eq!(maze.carve(2, 1), Ok(false));
        assert_eq!(maze.edge_count(), 1);
        assert!(maze.has_passage(1, 2));
        assert!(maze.has_passage(2, 1));
        assert_eq!(maze.passages(2).unwrap(), &[1]);
    }

    #[test]
    fn test_carve_rejects_bad_cells() {
        let mut maze = maze(3);
        assert_eq!(
            maze.carve(3, 4),
            Err(MazeError::NotAdjacent { from: 3, to: 4 })
        );
        assert_eq!(
            maze.carve(9, 10),
            Err(MazeError::InvalidCell {
                cell: 10,
                cell_count: 9
            })
        );
        assert_eq!(maze.edge_count(), 0);
    }

    #[test]
    fn test_edges_are_normalized_and_sorted() {
        let mut maze = maze(2);
        maze.carve(4, 3).unwrap();
        maze.carve(2, 1).unwrap();
        maze.carve(1, 3).unwrap();
        assert_eq!(maze.edges(), vec![(1, 2), (1, 3), (3, 4)]);
        assert_eq!(Edge::new(4, 3).normalized(), (3, 4));
    }

    #[test]
    fn test_walls() {
        let mut maze = maze(2);
        maze.carve(1, 2).unwrap();
        assert!(!maze.is_wall_right(1));
        assert!(maze.is_wall_below(1));
        // Boundary
        assert!(maze.is_wall_right(2));
        assert!(maze.is_wall_below(4));
    }
}
