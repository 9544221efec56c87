//! Perfect maze generation by randomized depth-first search with a selectable
//! backtracking policy, and shortest-path solving over the result.
//!
//! ```
//! use mazetree::{generators::{BranchPolicy, generate_maze}, solvers::solve_corners};
//!
//! let generation = generate_maze(11, BranchPolicy::Middle, Some(7)).unwrap();
//! assert!(generation.completed);
//! let path = solve_corners(&generation.maze).unwrap();
//! assert_eq!(path.start(), Some(1));
//! assert_eq!(path.end(), Some(100));
//! ```

pub mod error;
pub mod generators;
pub mod maze;
pub mod snapshot;
pub mod solvers;

#[cfg(test)]
mod testing;

pub use error::{MazeError, Result};
