//! Per-task scheduling context.
//!
//! The host owns the task itself; the scheduler keeps only the few fields
//! the policy reads and writes, keyed by pid (see `Scheduler::tasks`).

use crate::types::{Level, Tick, CLASS_PRIO_MIN};

/// Scheduling state the policy maintains for one task.
#[derive(Debug, Clone)]
pub struct TaskCtx {
    /// The priority the task reverts to when it leaves the ready state
    /// without having aged. Set by the host, read-only here.
    pub base_prio: i32,
    /// The priority actually used to select a queue. Lowered (made more
    /// urgent) by the aging sweep, restored to `base_prio` on dequeue.
    pub dyn_prio: i32,
    /// Ticks consumed during the current run since the task last began
    /// running or was last reset.
    pub quantum: Tick,
    /// Ticks spent waiting in a queue since the last enqueue. Never
    /// advances while the task runs.
    pub age_count: Tick,
    /// The level whose queue the task is linked into, or `None` while
    /// running or not runnable. A task is linked into at most one queue.
    pub location: Option<Level>,
}

impl TaskCtx {
    pub fn new(base_prio: i32) -> Self {
        TaskCtx {
            base_prio,
            dyn_prio: base_prio,
            quantum: 0,
            age_count: 0,
            location: None,
        }
    }

    /// The level this task's dynamic priority selects.
    pub fn level(&self) -> Level {
        Level::from_prio(self.dyn_prio)
    }

    /// Move the dynamic priority one step toward higher urgency, clamped
    /// at the top of the class band. The step starts from the clamped
    /// level, so an out-of-band priority is pulled into the band and a
    /// level-4 task moves to level 3 after one threshold regardless of
    /// how far outside the band its raw priority was.
    pub fn promote(&mut self) {
        self.dyn_prio = (self.level().to_prio() - 1).max(CLASS_PRIO_MIN);
    }
}
