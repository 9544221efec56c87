//! Generation snapshots for external renderers.
//!
//! The generator calls a [`SnapshotEmitter`] synchronously from its loop on a
//! caller-chosen cadence, plus once when the run ends. What happens with the
//! snapshot (drawing, frame capture, buffering) is up to the emitter.

use std::sync::mpsc::{Sender, SyncSender};

use crate::maze::{CellId, Edge};

/// Borrowed view of the generation state at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    /// Tree edges carved so far, in carve order
    pub edges: &'a [Edge],
    /// Cell the walk is standing on
    pub current: CellId,
    /// Loop iteration the snapshot was taken at
    pub step: usize,
    /// Set on the single emission that follows the end of the run
    pub is_final: bool,
}

impl Snapshot<'_> {
    pub fn to_owned_snapshot(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            edges: self.edges.to_vec(),
            current: self.current,
            step: self.step,
            is_final: self.is_final,
        }
    }
}

/// Snapshot that can outlive the generation loop, e.g. to cross a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedSnapshot {
    pub edges: Vec<Edge>,
    pub current: CellId,
    pub step: usize,
    pub is_final: bool,
}

/// Receiver of generation snapshots.
pub trait SnapshotEmitter {
    fn emit(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> SnapshotEmitter for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn emit(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

// A dropped receiver means nobody is watching anymore; generation carries on.
impl SnapshotEmitter for Sender<OwnedSnapshot> {
    fn emit(&mut self, snapshot: &Snapshot<'_>) {
        let _ = self.send(snapshot.to_owned_snapshot());
    }
}

impl SnapshotEmitter for SyncSender<OwnedSnapshot> {
    fn emit(&mut self, snapshot: &Snapshot<'_>) {
        let _ = self.send(snapshot.to_owned_snapshot());
    }
}

/// Emitter that ignores everything, used when no snapshots are wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSnapshots;

impl SnapshotEmitter for NoSnapshots {
    fn emit(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Whether a carve on `step` falls on the sampling cadence.
/// A cadence of 0 disables intermediate snapshots.
pub(crate) fn is_sampled(step: usize, every: usize) -> bool {
    every > 0 && step % every == 0
}
