use std::collections::VecDeque;

use crate::maze::{CellId, Maze};

/// Breadth-first search over open passages.
///
/// Returns the cells from `start` to `goal` inclusive, or `None` if `goal` is
/// unreachable. Both ids must already be valid for `maze`. The first time a
/// cell is reached is along a fewest-steps route, so cycles are harmless.
pub(super) fn solve_bfs(maze: &Maze, start: CellId, goal: CellId) -> Option<Vec<CellId>> {
    let grid = maze.grid();
    // Cell each visited cell was first reached from; the start is its own parent
    let mut parents: Vec<Option<CellId>> = vec![None; maze.node_count()];
    parents[grid.ravel_index(start)] = Some(start);

    let mut queue = VecDeque::from([start]);
    let mut expanded = 0usize;
    while let Some(current) = queue.pop_front() {
        expanded += 1;
        if current == goal {
            tracing::debug!("[solve] goal {} reached after expanding {} cells", goal, expanded);
            return Some(backtrack(maze, &parents, goal));
        }

        let Ok(next_cells) = maze.passages(current) else {
            continue;
        };
        for &next in next_cells {
            let slot = &mut parents[grid.ravel_index(next)];
            if slot.is_none() {
                *slot = Some(current);
                queue.push_back(next);
            }
        }
    }

    tracing::debug!("[solve] exhausted {} cells without reaching {}", expanded, goal);
    None
}

/// Walks parent links back from `goal` and returns the route start-first.
fn backtrack(maze: &Maze, parents: &[Option<CellId>], goal: CellId) -> Vec<CellId> {
    let grid = maze.grid();
    let mut route = vec![goal];
    let mut child = goal;
    while let Some(parent) = parents[grid.ravel_index(child)] {
        if parent == child {
            break;
        }
        route.push(parent);
        child = parent;
    }
    route.reverse();
    route
}
