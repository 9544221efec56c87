use crate::error::{MazeError, Result};

use super::cell::{CellId, Direction};

/// Square cell grid of side `m`, with cells numbered `1..=m*m` row by row.
///
/// The grid only knows topology: which ids exist and which ones touch.
/// Passages live in [`crate::maze::Maze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    side: usize,
}

impl Grid {
    /// Largest supported side. Keeps `side * side` and the per-cell arenas
    /// well inside `usize` on every target.
    pub const MAX_SIDE: usize = 1 << 12;

    /// Creates a grid with `side` cells along each edge.
    pub fn new(side: usize) -> Result<Self> {
        if !(1..=Self::MAX_SIDE).contains(&side) {
            return Err(MazeError::InvalidSide { side });
        }
        Ok(Grid { side })
    }

    /// Creates the cell grid that sits inside an `n`×`n` barrier grid.
    /// n barrier lines in each dimension -> n - 1 cells between them.
    pub fn from_barrier_size(n: usize) -> Result<Self> {
        if !(2..=Self::MAX_SIDE + 1).contains(&n) {
            return Err(MazeError::InvalidGridSize { n });
        }
        Ok(Grid { side: n - 1 })
    }

    /// Side length `m` in cells.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Size of the barrier grid this cell grid belongs to.
    pub fn barrier_size(&self) -> usize {
        self.side + 1
    }

    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }

    /// Id of the bottom-right cell.
    pub fn last_cell(&self) -> CellId {
        self.cell_count()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        (1..=self.cell_count()).contains(&cell)
    }

    /// Returns `InvalidCell` unless `cell` is in `1..=m*m`.
    pub fn check(&self, cell: CellId) -> Result<CellId> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(MazeError::InvalidCell {
                cell,
                cell_count: self.cell_count(),
            })
        }
    }

    /// Zero-based slot of a cell in per-cell arenas.
    pub(crate) fn ravel_index(&self, cell: CellId) -> usize {
        cell - 1
    }

    /// Zero-based `(row, col)` of a cell.
    pub fn coords(&self, cell: CellId) -> Result<(usize, usize)> {
        let cell = self.check(cell)?;
        Ok(((cell - 1) / self.side, (cell - 1) % self.side))
    }

    /// Cell id at zero-based `(row, col)`, if inside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellId> {
        self.is_in_bounds((row, col))
            .then_some(row * self.side + col + 1)
    }

    fn is_in_bounds(&self, coord: (usize, usize)) -> bool {
        coord.0 < self.side && coord.1 < self.side
    }

    /// Orthogonal neighbours of `cell` that lie inside the grid, in the order
    /// left, right, up, down.
    pub fn neighbors(&self, cell: CellId) -> Result<Vec<CellId>> {
        let cell = self.check(cell)?;
        Ok(self.adjacent(cell).collect())
    }

    /// Same as [`Grid::neighbors`] for a cell already known to be valid.
    pub(crate) fn adjacent(&self, cell: CellId) -> impl Iterator<Item = CellId> {
        let grid = *self;
        let (row, col) = ((cell - 1) / grid.side, (cell - 1) % grid.side);
        Direction::ALL.into_iter().filter_map(move |dir| {
            let (dr, dc) = dir.offset();
            grid.cell_at(row.checked_add_signed(dr)?, col.checked_add_signed(dc)?)
        })
    }

    /// Whether `p` and `q` are distinct cells sharing a wall.
    pub fn are_adjacent(&self, p: CellId, q: CellId) -> bool {
        match (self.coords(p), self.coords(q)) {
            (Ok((pr, pc)), Ok((qr, qc))) => pr.abs_diff(qr) + pc.abs_diff(qc) == 1,
            _ => false,
        }
    }
}
