/// Identifier of a maze cell: 1-based, numbered row by row.
pub type CellId = usize;

/// Generation-time state of a cell, stored in an arena indexed by cell id.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Not yet incorporated into the spanning tree.
    #[default]
    Available,
    /// Reached by the walk. A cell leaves `Available` exactly once.
    Visited,
}

/// The four orthogonal directions, in the order neighbours are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Neighbour enumeration order: left, right, up, down.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Row and column offset of a step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}
