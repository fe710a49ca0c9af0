//! The per-processor run queue: five FIFO levels plus the running task.
//!
//! The queues hold pids only; the per-task scheduling context lives in the
//! scheduler's task map. One instance exists per processor and the host
//! serializes all access to it.

use std::collections::VecDeque;

use crate::types::{Level, Pid, NR_LEVELS};

/// Ordered collection of FIFO queues, one per priority level, plus the
/// identity of the currently running task.
#[derive(Debug, Default)]
pub struct RunQueue {
    levels: [VecDeque<Pid>; NR_LEVELS],
    /// The task presently running on this processor, if any. Not counted
    /// in `nr_runnable` and not linked into any level.
    pub current: Option<Pid>,
    nr_runnable: usize,
}

impl RunQueue {
    pub fn new() -> Self {
        RunQueue::default()
    }

    /// Append `pid` to the tail of `level`'s queue.
    ///
    /// The caller guarantees the task is not already linked anywhere.
    pub fn link_at(&mut self, pid: Pid, level: Level) {
        debug_assert!(
            !self.levels.iter().any(|q| q.contains(&pid)),
            "task {pid} already linked"
        );
        self.levels[level.0].push_back(pid);
        self.nr_runnable += 1;
    }

    /// Remove `pid` from `level`'s queue. Returns whether it was linked
    /// there; the caller treats `false` as a contract violation.
    pub fn unlink(&mut self, pid: Pid, level: Level) -> bool {
        let queue = &mut self.levels[level.0];
        match queue.iter().position(|&p| p == pid) {
            Some(idx) => {
                queue.remove(idx);
                self.nr_runnable -= 1;
                true
            }
            None => false,
        }
    }

    /// The first non-empty level, scanning from most urgent.
    pub fn first_nonempty(&self) -> Option<Level> {
        (0..NR_LEVELS).map(Level).find(|l| !self.levels[l.0].is_empty())
    }

    /// The task at the head of `level`'s queue (earliest arrival).
    pub fn head(&self, level: Level) -> Option<Pid> {
        self.levels[level.0].front().copied()
    }

    /// Snapshot of the pids queued at `level`, head first. The aging sweep
    /// iterates this copy so relinking cannot skip or repeat entries.
    pub fn level_pids(&self, level: Level) -> Vec<Pid> {
        self.levels[level.0].iter().copied().collect()
    }

    pub fn level_len(&self, level: Level) -> usize {
        self.levels[level.0].len()
    }

    /// Count of tasks linked into any level (excludes `current`).
    pub fn nr_runnable(&self) -> usize {
        self.nr_runnable
    }

    pub fn is_empty(&self) -> bool {
        self.nr_runnable == 0
    }
}
