use std::collections::VecDeque;

use rand::Rng;

use super::{BranchPolicy, Generation, GeneratorConfig};
use crate::maze::{CellId, CellState, Edge, Grid, Maze};
use crate::snapshot::{self, Snapshot, SnapshotEmitter};

/// Cells that had more than one unvisited neighbour when the walk left them,
/// kept as resumption points for when the walk hits a dead end.
///
/// Unlike a plain stack, an entry can be taken from the front, the back or
/// the middle, depending on the [`BranchPolicy`].
#[derive(Debug, Default, Clone)]
pub struct BranchStack {
    branches: VecDeque<CellId>,
}

impl BranchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: CellId) {
        self.branches.push_back(cell);
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Removes and returns the entry the policy selects.
    pub fn take(&mut self, policy: BranchPolicy) -> Option<CellId> {
        if self.branches.is_empty() {
            return None;
        }
        let index = policy.index(self.branches.len());
        self.branches.remove(index)
    }
}

/// Randomized depth-first walk from cell 1 that carves a spanning tree.
///
/// Each iteration either visits a new cell or consumes one branch entry, and
/// entries are only added when a new cell is visited, so the walk ends well
/// within `config`'s iteration bound unless something is broken. Hitting the
/// bound anyway yields `completed == false` with the partial tree.
pub(super) fn randomized_dfs<R, E>(
    grid: Grid,
    config: &GeneratorConfig,
    rng: &mut R,
    emitter: &mut E,
) -> Generation
where
    R: Rng,
    E: SnapshotEmitter + ?Sized,
{
    let cell_count = grid.cell_count();
    let max_iterations = config.iteration_bound(&grid);

    let mut maze = Maze::new(grid);
    let mut states = vec![CellState::Available; cell_count].into_boxed_slice();
    let mut visited = 0;
    let mut branches = BranchStack::new();
    let mut edges: Vec<Edge> = Vec::with_capacity(cell_count.saturating_sub(1));

    let mut current: CellId = 1;
    let mut iterations = 0;

    let completed = loop {
        if iterations == max_iterations {
            tracing::warn!(
                "[generate] iteration bound {} reached with {}/{} cells visited",
                max_iterations,
                visited,
                cell_count
            );
            break false;
        }
        iterations += 1;

        // Popped branch points were visited when they were recorded
        let state = &mut states[grid.ravel_index(current)];
        if *state == CellState::Available {
            *state = CellState::Visited;
            visited += 1;
        }
        if visited == cell_count {
            break true;
        }

        let candidates = grid
            .adjacent(current)
            .filter(|&cell| states[grid.ravel_index(cell)] == CellState::Available)
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            // Dead end. A popped branch point may have lost its unvisited
            // neighbours to a later part of the walk; it then dead-ends again.
            match branches.take(config.policy) {
                Some(branch) => {
                    tracing::debug!(
                        "[generate] dead end at {}, resuming from branch {} ({} left)",
                        current,
                        branch,
                        branches.len()
                    );
                    current = branch;
                    continue;
                }
                None => break true,
            }
        }

        // A single candidate consumes no randomness
        let next = match candidates.len() {
            1 => candidates[0],
            n => candidates[rng.random_range(0..n)],
        };
        maze.open_passage(current, next);
        edges.push(Edge::new(current, next));
        if candidates.len() > 1 {
            branches.push(current);
        }
        current = next;

        if snapshot::is_sampled(iterations, config.snapshot_every) {
            emitter.emit(&Snapshot {
                edges: &edges,
                current,
                step: iterations,
                is_final: false,
            });
        }
    };

    if completed && visited < cell_count {
        tracing::warn!(
            "[generate] walk ended with {} unreachable cells abandoned",
            cell_count - visited
        );
    }

    emitter.emit(&Snapshot {
        edges: &edges,
        current,
        step: iterations,
        is_final: true,
    });

    tracing::debug!(
        "[generate] {}x{} maze with policy {}: {} edges in {} iterations",
        grid.side(),
        grid.side(),
        config.policy,
        edges.len(),
        iterations
    );

    Generation {
        maze,
        edges,
        completed,
        iterations,
        visited,
    }
}
