mod bfs;

use bfs::solve_bfs;

use crate::{
    error::{MazeError, Result},
    maze::{CellId, Maze},
};

/// Simple walk through a maze, listed from start cell to end cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<CellId>);

impl Path {
    pub fn cells(&self) -> &[CellId] {
        &self.0
    }

    /// Number of cells on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a path holds at least its start cell.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps, i.e. passages walked.
    pub fn edge_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<CellId> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<CellId> {
        self.0.last().copied()
    }

    /// Consecutive cell pairs along the path.
    pub fn steps(&self) -> impl Iterator<Item = (CellId, CellId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn into_cells(self) -> Vec<CellId> {
        self.0
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self
            .0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(f, "{}", cells)
    }
}

/// Finds a shortest path (by number of steps) from `start` to `end`.
///
/// On a completed maze this is the unique path between the two cells; on a
/// graph with cycles it is one of the shortest.
///
/// # Errors
/// * `InvalidCell` if either id is outside the maze
/// * `NotFound` if `end` cannot be reached from `start`
pub fn solve(maze: &Maze, start: CellId, end: CellId) -> Result<Path> {
    let grid = maze.grid();
    grid.check(start)?;
    grid.check(end)?;
    tracing::debug!(
        "[solve] looking for path from {} to {} ({} nodes, {} edges)",
        start,
        end,
        maze.node_count(),
        maze.edge_count()
    );

    match solve_bfs(maze, start, end) {
        Some(cells) => Ok(Path(cells)),
        None => Err(MazeError::NotFound { start, end }),
    }
}

/// Solves from the top-left cell (1) to the bottom-right cell (`m*m`).
pub fn solve_corners(maze: &Maze) -> Result<Path> {
    solve(maze, 1, maze.grid().last_cell())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::generators::{BranchPolicy, GeneratorConfig, generate, generate_maze};
    use crate::maze::Grid;
    use crate::testing::{Pick, ScriptedRng};

    fn maze_with(side: usize, passages: &[(CellId, CellId)]) -> Maze {
        let mut maze = Maze::new(Grid::new(side).unwrap());
        for &(p, q) in passages {
            maze.carve(p, q).unwrap();
        }
        maze
    }

    /// Steps from `start` to every cell, computed independently of the solver.
    fn distances(maze: &Maze, start: CellId) -> Vec<Option<usize>> {
        let mut dist = vec![None; maze.node_count() + 1];
        dist[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            let d = dist[cell].unwrap();
            for &next in maze.passages(cell).unwrap() {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    fn assert_valid_walk(maze: &Maze, path: &Path) {
        assert!(path.steps().all(|(p, q)| maze.has_passage(p, q)));
        let mut cells = path.cells().to_vec();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), path.len(), "path repeats a cell");
    }

    #[test]
    fn test_solve_generated_mazes() {
        for policy in BranchPolicy::ALL {
            for n in [2, 3, 5, 11, 21] {
                let generation = generate_maze(n, policy, Some(n as u64)).unwrap();
                let maze = &generation.maze;
                let path = solve_corners(maze).unwrap();
                assert_eq!(path.start(), Some(1));
                assert_eq!(path.end(), Some(maze.node_count()));
                assert_valid_walk(maze, &path);
                let expected = distances(maze, 1)[maze.node_count()].unwrap();
                assert_eq!(path.edge_count(), expected);
            }
        }
    }

    #[test]
    fn test_single_cell_path() {
        let generation = generate_maze(2, BranchPolicy::Middle, None).unwrap();
        let path = solve(&generation.maze, 1, 1).unwrap();
        assert_eq!(path.cells(), &[1]);
        assert_eq!(path.len(), 1);
        assert_eq!(path.edge_count(), 0);
    }

    #[test]
    fn test_golden_maze_path() {
        let grid = Grid::new(3).unwrap();
        let mut rng = ScriptedRng::new([Pick::Mid, Pick::Low, Pick::Low, Pick::Low]);
        let generation = generate(grid, &GeneratorConfig::with_policy(BranchPolicy::Middle), &mut rng);
        let path = solve(&generation.maze, 1, 9).unwrap();
        assert_eq!(path.cells(), &[1, 4, 5, 6, 9]);
        assert_eq!(
            path.edge_count(),
            distances(&generation.maze, 1)[9].unwrap()
        );
    }

    #[test]
    fn test_unique_path_in_tree() {
        // Serpentine tree: 1-2-3, 3-6, 6-5-4, 4-7, 7-8-9
        let maze = maze_with(
            3,
            &[(1, 2), (2, 3), (3, 6), (6, 5), (5, 4), (4, 7), (7, 8), (8, 9)],
        );
        let path = solve_corners(&maze).unwrap();
        assert_eq!(path.cells(), &[1, 2, 3, 6, 5, 4, 7, 8, 9]);
        assert_eq!(path.to_string(), "1 -> 2 -> 3 -> 6 -> 5 -> 4 -> 7 -> 8 -> 9");
    }

    #[test]
    fn test_shortest_path_with_cycle() {
        // 2x2 ring plus nothing else; both routes from 1 to 4 take two steps
        let maze = maze_with(2, &[(1, 2), (2, 4), (1, 3), (3, 4)]);
        let path = solve(&maze, 1, 4).unwrap();
        assert_eq!(path.edge_count(), 2);
        assert_valid_walk(&maze, &path);

        // Long way round vs. direct passage on a 3x3 loop
        let maze = maze_with(
            3,
            &[(1, 2), (2, 3), (3, 6), (6, 9), (9, 8), (8, 7), (7, 4), (4, 1)],
        );
        let path = solve(&maze, 1, 7).unwrap();
        assert_eq!(path.cells(), &[1, 4, 7]);
    }

    #[test]
    fn test_not_found() {
        let maze = maze_with(3, &[(1, 2), (2, 3), (8, 9)]);
        assert_eq!(
            solve_corners(&maze),
            Err(MazeError::NotFound { start: 1, end: 9 })
        );
        assert!(solve(&maze, 9, 1).unwrap_err().is_not_found());
        assert_eq!(solve(&maze, 8, 9).unwrap().cells(), &[8, 9]);
    }

    #[test]
    fn test_invalid_cells() {
        let maze = maze_with(3, &[]);
        assert_eq!(
            solve(&maze, 0, 9),
            Err(MazeError::InvalidCell {
                cell: 0,
                cell_count: 9
            })
        );
        assert_eq!(
            solve(&maze, 1, 10),
            Err(MazeError::InvalidCell {
                cell: 10,
                cell_count: 9
            })
        );
    }
}
