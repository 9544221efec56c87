use std::{fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use mazetree::{
    maze::{CellId, Grid, Maze},
    snapshot::OwnedSnapshot,
    solvers::Path,
};

/// One square of the barrier grid as drawn on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Standing wall, or a cell the walk has not reached yet
    Wall,
    /// Open cell or removed wall
    Empty,
    /// Cell the generation walk is standing on
    Current,
    /// Part of the solution route
    Route,
    Start,
    Goal,
}

impl GridCell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            GridCell::Wall => "⬜".with(Color::White),
            GridCell::Empty => "  ".with(Color::Reset),
            GridCell::Current => "🟦".with(Color::Blue),
            GridCell::Route => "🟨".with(Color::Yellow),
            GridCell::Start => "🟩".with(Color::Green),
            GridCell::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Barrier-grid picture of a maze: `2m + 1` squares per side, cells at odd
/// coordinates and the walls between them at even ones.
pub struct Board {
    data: Box<[GridCell]>,
    size: usize,
    grid: Grid,
}

impl Board {
    /// A board with every square walled in.
    fn walled(grid: Grid) -> Self {
        let size = grid.side() * 2 + 1;
        Board {
            data: vec![GridCell::Wall; size * size].into_boxed_slice(),
            size,
            grid,
        }
    }

    /// Draws a finished (or partial) maze.
    pub fn from_maze(maze: &Maze) -> Self {
        let mut board = Board::walled(*maze.grid());
        for cell in 1..=maze.node_count() {
            board.set_cell(cell, GridCell::Empty);
            if let Some((row, col)) = board.cell_coord(cell) {
                if !maze.is_wall_right(cell) {
                    board.set((row, col + 1), GridCell::Empty);
                }
                if !maze.is_wall_below(cell) {
                    board.set((row + 1, col), GridCell::Empty);
                }
            }
        }
        board
    }

    /// Draws the tree carved so far, with unreached cells still walled.
    pub fn from_snapshot(grid: Grid, snapshot: &OwnedSnapshot) -> Self {
        let mut board = Board::walled(grid);
        board.set_cell(1, GridCell::Empty);
        for edge in &snapshot.edges {
            board.set_cell(edge.from, GridCell::Empty);
            board.set_cell(edge.to, GridCell::Empty);
            board.set_between(edge.from, edge.to, GridCell::Empty);
        }
        board.set_cell(snapshot.current, GridCell::Current);
        board
    }

    /// Paints a solution route, marking its endpoints.
    pub fn mark_route(&mut self, path: &Path) {
        for (p, q) in path.steps() {
            self.set_cell(p, GridCell::Route);
            self.set_cell(q, GridCell::Route);
            self.set_between(p, q, GridCell::Route);
        }
        if let Some(start) = path.start() {
            self.set_cell(start, GridCell::Start);
        }
        if let Some(end) = path.end() {
            self.set_cell(end, GridCell::Goal);
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn ravel_index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Board coordinate of a maze cell.
    fn cell_coord(&self, cell: CellId) -> Option<(usize, usize)> {
        let (row, col) = self.grid.coords(cell).ok()?;
        Some((row * 2 + 1, col * 2 + 1))
    }

    fn set(&mut self, (row, col): (usize, usize), cell: GridCell) {
        if row < self.size && col < self.size {
            let idx = self.ravel_index(row, col);
            self.data[idx] = cell;
        }
    }

    fn set_cell(&mut self, cell: CellId, value: GridCell) {
        if let Some(coord) = self.cell_coord(cell) {
            self.set(coord, value);
        }
    }

    /// Sets the wall square between two adjacent cells.
    fn set_between(&mut self, p: CellId, q: CellId, value: GridCell) {
        if let (Some((pr, pc)), Some((qr, qc))) = (self.cell_coord(p), self.cell_coord(q)) {
            self.set(((pr + qr) / 2, (pc + qc) / 2), value);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.data.chunks(self.size)
    }
}

/// Whether a board of this grid fits in the current terminal.
pub fn fits_terminal(grid: Grid) -> std::io::Result<bool> {
    let size = grid.side() * 2 + 1;
    let (term_width, term_height) = terminal::size()?;
    Ok(size * GridCell::CELL_WIDTH as usize <= term_width as usize
        && size < term_height as usize)
}

/// Prints the board at the cursor position.
pub fn draw<W: Write>(out: &mut W, board: &Board) -> std::io::Result<()> {
    for row in board.rows() {
        for cell in row {
            out.queue(style::Print(cell))?;
        }
        out.queue(style::Print("\r\n"))?;
    }
    out.flush()
}

/// Redraws the board from the top-left corner of a cleared screen.
pub fn draw_frame<W: Write>(out: &mut W, board: &Board) -> std::io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    draw(out, board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazetree::maze::Edge;

    fn grid(side: usize) -> Grid {
        Grid::new(side).unwrap()
    }

    #[test]
    fn test_board_from_maze() {
        let mut maze = Maze::new(grid(2));
        maze.carve(1, 2).unwrap();
        maze.carve(2, 4).unwrap();
        maze.carve(4, 3).unwrap();
        let board = Board::from_maze(&maze);
        assert_eq!(board.size(), 5);
        let rows = board.rows().collect::<Vec<_>>();
        use GridCell::{Empty as E, Wall as W};
        assert_eq!(rows[0], &[W, W, W, W, W]);
        assert_eq!(rows[1], &[W, E, E, E, W]);
        assert_eq!(rows[2], &[W, W, W, E, W]);
        assert_eq!(rows[3], &[W, E, E, E, W]);
        assert_eq!(rows[4], &[W, W, W, W, W]);
    }

    #[test]
    fn test_board_from_snapshot() {
        let snapshot = OwnedSnapshot {
            edges: vec![Edge::new(1, 3)],
            current: 3,
            step: 1,
            is_final: false,
        };
        let board = Board::from_snapshot(grid(2), &snapshot);
        let rows = board.rows().collect::<Vec<_>>();
        use GridCell::{Current as C, Empty as E, Wall as W};
        assert_eq!(rows[1], &[W, E, W, W, W]);
        assert_eq!(rows[2], &[W, E, W, W, W]);
        assert_eq!(rows[3], &[W, C, W, W, W]);
    }

    #[test]
    fn test_mark_route() {
        let mut maze = Maze::new(grid(2));
        maze.carve(1, 2).unwrap();
        maze.carve(2, 4).unwrap();
        maze.carve(1, 3).unwrap();
        let path = mazetree::solvers::solve_corners(&maze).unwrap();
        let mut board = Board::from_maze(&maze);
        board.mark_route(&path);
        let rows = board.rows().collect::<Vec<_>>();
        use GridCell::{Empty as E, Goal as G, Route as R, Start as S, Wall as W};
        assert_eq!(rows[1], &[W, S, R, R, W]);
        assert_eq!(rows[2], &[W, E, W, R, W]);
        assert_eq!(rows[3], &[W, E, W, G, W]);
    }

    #[test]
    fn test_glyph_widths() {
        for cell in [
            GridCell::Wall,
            GridCell::Empty,
            GridCell::Current,
            GridCell::Route,
            GridCell::Start,
            GridCell::Goal,
        ] {
            // Display asserts the width in debug builds
            let _ = cell.to_string();
        }
    }
}
