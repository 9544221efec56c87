//! Test doubles and graph checks shared by the unit tests.

use std::collections::VecDeque;

use rand::RngCore;

use crate::maze::{CellId, Maze};

/// Scripted pick for [`ScriptedRng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pick {
    /// Index 0 of the candidates
    Low,
    /// Index `len / 2` of the candidates
    Mid,
}

/// Random source that replays a fixed sequence of picks, then keeps picking
/// `Low`. Each draw is either all zero bits or only the top bit set, so any
/// multiply-shift range sampler lands exactly on index 0 or `len / 2`.
pub(crate) struct ScriptedRng {
    picks: VecDeque<Pick>,
}

impl ScriptedRng {
    pub(crate) fn new(picks: impl IntoIterator<Item = Pick>) -> Self {
        ScriptedRng {
            picks: picks.into_iter().collect(),
        }
    }

    fn next_pick(&mut self) -> Pick {
        self.picks.pop_front().unwrap_or(Pick::Low)
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        match self.next_pick() {
            Pick::Low => 0,
            Pick::Mid => 1 << 31,
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self.next_pick() {
            Pick::Low => 0,
            Pick::Mid => 1 << 63,
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

/// Number of cells reachable from cell 1 along open passages.
pub(crate) fn reachable_from_first(maze: &Maze) -> usize {
    let mut seen = vec![false; maze.node_count() + 1];
    let mut queue = VecDeque::from([1 as CellId]);
    seen[1] = true;
    let mut count = 0;
    while let Some(cell) = queue.pop_front() {
        count += 1;
        for &next in maze.passages(cell).unwrap() {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    count
}

/// Panics unless `maze` is a spanning tree over all of its cells.
pub(crate) fn assert_spanning_tree(maze: &Maze) {
    let nodes = maze.node_count();
    assert_eq!(maze.edge_count(), nodes - 1, "spanning tree edge count");
    assert_eq!(reachable_from_first(maze), nodes, "every cell reachable");
}
