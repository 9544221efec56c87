use thiserror::Error;

use crate::maze::{CellId, Grid};

/// Errors surfaced by grid construction, generation and solving.
///
/// None of these are fatal: each one carries enough context for the caller to
/// report it or to retry with a fresh seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("barrier grid size {n} is out of range, expected 2..={max}", max = Grid::MAX_SIDE + 1)]
    InvalidGridSize { n: usize },

    #[error("grid side {side} is out of range, expected 1..={max}", max = Grid::MAX_SIDE)]
    InvalidSide { side: usize },

    #[error("cell {cell} is outside the grid (valid ids are 1..={cell_count})")]
    InvalidCell { cell: CellId, cell_count: usize },

    #[error("cells {from} and {to} are not orthogonal neighbours")]
    NotAdjacent { from: CellId, to: CellId },

    #[error(
        "generation stopped after {iterations} iterations with {visited} of {cell_count} cells visited"
    )]
    GenerationIncomplete {
        iterations: usize,
        visited: usize,
        cell_count: usize,
    },

    #[error("no path from cell {start} to cell {end}")]
    NotFound { start: CellId, end: CellId },
}

impl MazeError {
    /// Whether this is the non-fatal "no path" outcome of a solve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MazeError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
