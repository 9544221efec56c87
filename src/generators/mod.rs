use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;

mod dfs;

pub use dfs::BranchStack;
use dfs::randomized_dfs;

use crate::{
    error::{MazeError, Result},
    maze::{Edge, Grid, Maze},
    snapshot::{NoSnapshots, SnapshotEmitter},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Which recorded branch point the walk resumes from after a dead end.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchPolicy {
    /// The oldest branch point
    First,
    /// The branch point halfway through the stack
    #[default]
    Middle,
    /// The most recent branch point, i.e. classic recursive backtracking
    Last,
}

impl BranchPolicy {
    pub const ALL: [BranchPolicy; 3] = [
        BranchPolicy::First,
        BranchPolicy::Middle,
        BranchPolicy::Last,
    ];

    /// Index this policy selects in a non-empty stack of `len` entries.
    pub fn index(self, len: usize) -> usize {
        match self {
            BranchPolicy::First => 0,
            BranchPolicy::Middle => len / 2,
            BranchPolicy::Last => len.saturating_sub(1),
        }
    }
}

impl std::fmt::Display for BranchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchPolicy::First => write!(f, "first"),
            BranchPolicy::Middle => write!(f, "middle"),
            BranchPolicy::Last => write!(f, "last"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown branching policy {0:?}, expected one of: first, middle, last")]
pub struct ParseBranchPolicyError(String);

impl std::str::FromStr for BranchPolicy {
    type Err = ParseBranchPolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(BranchPolicy::First),
            "middle" => Ok(BranchPolicy::Middle),
            "last" => Ok(BranchPolicy::Last),
            _ => Err(ParseBranchPolicyError(s.to_string())),
        }
    }
}

/// Iteration bound used when none is configured: 4 per cell.
pub fn default_iteration_bound(cell_count: usize) -> usize {
    cell_count.saturating_mul(4).max(4)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub policy: BranchPolicy,
    /// Safety bound on loop iterations. `None` scales with the grid.
    pub max_iterations: Option<usize>,
    /// Emit a snapshot after every carve on an iteration divisible by this.
    /// 0 only emits the final snapshot.
    pub snapshot_every: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            policy: BranchPolicy::default(),
            max_iterations: None,
            snapshot_every: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn with_policy(policy: BranchPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn iteration_bound(&self, grid: &Grid) -> usize {
        self.max_iterations
            .unwrap_or_else(|| default_iteration_bound(grid.cell_count()))
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Passage graph; a spanning tree when `completed`
    pub maze: Maze,
    /// Carved edges in the order the walk added them
    pub edges: Vec<Edge>,
    /// `false` if the iteration bound cut the run short
    pub completed: bool,
    /// Loop iterations executed
    pub iterations: usize,
    /// Cells incorporated into the tree
    pub visited: usize,
}

impl Generation {
    /// Reports a truncated run as `GenerationIncomplete`.
    /// The partial maze stays available in `self`.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.completed {
            Ok(())
        } else {
            Err(MazeError::GenerationIncomplete {
                iterations: self.iterations,
                visited: self.visited,
                cell_count: self.maze.node_count(),
            })
        }
    }
}

/// Generates a maze over `grid` without snapshots.
pub fn generate<R: Rng>(grid: Grid, config: &GeneratorConfig, rng: &mut R) -> Generation {
    randomized_dfs(grid, config, rng, &mut NoSnapshots)
}

/// Generates a maze over `grid`, handing snapshots to `emitter` on the
/// configured cadence and once more at the end.
pub fn generate_with_snapshots<R, E>(
    grid: Grid,
    config: &GeneratorConfig,
    rng: &mut R,
    emitter: &mut E,
) -> Generation
where
    R: Rng,
    E: SnapshotEmitter + ?Sized,
{
    randomized_dfs(grid, config, rng, emitter)
}

/// Generates a maze inside an `n`×`n` barrier grid (`n - 1` cells per side).
pub fn generate_maze(n: usize, policy: BranchPolicy, seed: Option<u64>) -> Result<Generation> {
    let grid = Grid::from_barrier_size(n)?;
    let mut rng = get_rng(seed);
    Ok(generate(grid, &GeneratorConfig::with_policy(policy), &mut rng))
}
