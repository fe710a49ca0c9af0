//! The scheduling policy: multi-level round robin with priority aging.
//!
//! The host dispatcher calls into the policy at fixed transition points
//! (the scheduling-class contract): a task becomes runnable → `enqueue`,
//! leaves the runnable state → `dequeue`, the periodic timer fires while a
//! task runs → `task_tick`, the host needs a task → `pick_next`. The
//! policy never calls back into the host except by returning a reschedule
//! request or `None` from a pick.
//!
//! All operations are synchronous and bounded; the host serializes calls
//! per run queue (one run queue per processor).

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use crate::events::{EventSink, NullSink, SchedEvent};
use crate::rq::RunQueue;
use crate::stats::SchedStats;
use crate::task::TaskCtx;
use crate::tunables::Tunables;
use crate::types::{Level, Pid, Tick, NR_LEVELS};

/// One processor's scheduler instance: the run queue, the per-task
/// scheduling contexts and the tunable handle.
pub struct Scheduler {
    tunables: Arc<Tunables>,
    rq: RunQueue,
    tasks: HashMap<Pid, TaskCtx>,
    sink: Box<dyn EventSink>,
    stats: SchedStats,
}

impl Scheduler {
    pub fn new(tunables: Arc<Tunables>) -> Self {
        Scheduler {
            tunables,
            rq: RunQueue::new(),
            tasks: HashMap::new(),
            sink: Box::new(NullSink),
            stats: SchedStats::default(),
        }
    }

    /// Replace the observability sink the policy reports events to.
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    fn emit(&mut self, ev: SchedEvent) {
        log::trace!("{ev}");
        self.sink.event(&ev);
    }

    /// Register a task with the policy. The scheduling context starts at
    /// `prio` for both base and dynamic priority.
    pub fn enable(&mut self, pid: Pid, prio: i32) {
        debug_assert!(
            !self.tasks.get(&pid).is_some_and(|c| c.location.is_some()),
            "enable of a queued task {pid}"
        );
        self.tasks.insert(pid, TaskCtx::new(prio));
    }

    /// Forget a task (task exit). Unlinks it first if it is still queued.
    pub fn disable(&mut self, pid: Pid) {
        if let Some(ctx) = self.tasks.remove(&pid) {
            if let Some(level) = ctx.location {
                self.rq.unlink(pid, level);
            }
        }
        if self.rq.current == Some(pid) {
            self.rq.current = None;
        }
    }

    /// The task became runnable: link it at the tail of its level and
    /// refresh its accounting.
    pub fn enqueue(&mut self, pid: Pid) {
        let timeslice = self.tunables.timeslice();
        let Some(ctx) = self.tasks.get_mut(&pid) else {
            warn!("enqueue of unknown task {pid}");
            return;
        };
        let level = ctx.level();
        ctx.location = Some(level);
        ctx.age_count = 0;
        // A task that ran out its previous timeslice starts a fresh one on
        // re-entry to the ready state; a task that blocked mid-slice keeps
        // the remainder.
        if ctx.quantum >= timeslice {
            ctx.quantum = 0;
        }
        self.rq.link_at(pid, level);
        self.stats.nr_enqueues += 1;
        self.emit(SchedEvent::Enqueued { pid, level });
    }

    /// The task left the runnable state: unlink it and, when it saw no
    /// aging promotion since it last became runnable, revert its dynamic
    /// priority to base. An aging-earned boost therefore lasts only while
    /// the task remains in the just-promoted state.
    pub fn dequeue(&mut self, pid: Pid) {
        let Some(ctx) = self.tasks.get_mut(&pid) else {
            warn!("dequeue of unknown task {pid}");
            return;
        };
        // The running task is not linked anywhere; dequeue then only
        // applies the accounting rules (yield and tick rely on this).
        if let Some(level) = ctx.location.take() {
            let linked = self.rq.unlink(pid, level);
            debug_assert!(linked, "task {pid} had stale queue membership");
        }
        let prio_reset = ctx.age_count == 0;
        if prio_reset {
            ctx.dyn_prio = ctx.base_prio;
            self.stats.nr_prio_resets += 1;
        }
        self.stats.nr_dequeues += 1;
        self.emit(SchedEvent::Dequeued { pid, prio_reset });
    }

    /// The running task voluntarily yields: move it to the tail of its
    /// (possibly reset) level and refresh its counters. Whether to switch
    /// is the host's decision; no reschedule is requested here.
    pub fn yield_task(&mut self) {
        let Some(pid) = self.rq.current else {
            warn!("yield with no running task");
            return;
        };
        self.dequeue(pid);
        self.enqueue(pid);
        self.stats.nr_yields += 1;
        self.emit(SchedEvent::Yielded { pid });
    }

    /// A task arrived while another runs. Returns true when the host
    /// should reschedule: the arriving task's level is strictly more
    /// urgent than the running task's. Pure comparison; the actual switch
    /// happens on the host's next `pick_next`.
    pub fn check_preempt(&mut self, pid: Pid) -> bool {
        let Some(curr) = self.rq.current else {
            return false;
        };
        let (Some(arriving), Some(running)) = (self.tasks.get(&pid), self.tasks.get(&curr))
        else {
            return false;
        };
        if arriving.level().more_urgent_than(running.level()) {
            self.stats.nr_preempt_signals += 1;
            self.emit(SchedEvent::PreemptRequested { curr, by: pid });
            true
        } else {
            false
        }
    }

    /// The head task of the first non-empty level, or `None` when the run
    /// queue is empty (the host falls through to a lower scheduling tier).
    /// The task is not removed; the host dequeues it when it begins to
    /// run.
    pub fn pick_next(&mut self) -> Option<Pid> {
        let level = self.rq.first_nonempty()?;
        let pid = self.rq.head(level)?;
        self.stats.nr_picks += 1;
        self.emit(SchedEvent::Picked { pid, level });
        Some(pid)
    }

    /// Host bookkeeping hook: the task stopped running on this processor.
    pub fn put_prev(&mut self, pid: Pid) {
        if self.rq.current == Some(pid) {
            self.rq.current = None;
        }
    }

    /// Host bookkeeping hook: the task now runs on this processor.
    pub fn set_current(&mut self, pid: Pid) {
        debug_assert!(
            self.tasks.get(&pid).is_some_and(|c| c.location.is_none()),
            "running task {pid} still queued"
        );
        self.rq.current = Some(pid);
    }

    /// Periodic timer accounting, invoked once per tick while a task runs.
    /// Returns true when the host should reschedule.
    ///
    /// Two phases: first timeslice expiry on the running task (rotation to
    /// the tail of its level), then the aging sweep over every level
    /// strictly less urgent than the running task's.
    pub fn task_tick(&mut self) -> bool {
        self.stats.nr_ticks += 1;
        let Some(curr) = self.rq.current else {
            warn!("tick with no running task");
            return false;
        };

        let resched = self.tick_timeslice(curr);
        self.tick_aging(curr);
        resched
    }

    /// Phase one: charge one tick of quantum to the running task and
    /// rotate it once the timeslice is used up. The dequeue/enqueue pair
    /// both applies the priority-reset rule and moves the task to the tail
    /// of its level with fresh counters.
    fn tick_timeslice(&mut self, curr: Pid) -> bool {
        let timeslice = self.tunables.timeslice();
        let Some(ctx) = self.tasks.get_mut(&curr) else {
            warn!("tick for unknown task {curr}");
            return false;
        };
        ctx.quantum += 1;
        if ctx.quantum < timeslice {
            return false;
        }
        self.stats.nr_timeslice_expirations += 1;
        self.emit(SchedEvent::TimesliceExpired { pid: curr });
        self.dequeue(curr);
        self.enqueue(curr);
        true
    }

    /// Phase two: age every task waiting at a level strictly less urgent
    /// than the running task's (a task at or above that level needs no
    /// aging, it is already eligible to preempt). A task reaching the age
    /// threshold is promoted one level and relinked, which resets its age.
    ///
    /// The running task never appears in any scanned queue, so it accrues
    /// no age while it runs. Each level is iterated over a snapshot:
    /// promotion moves a task to an already-scanned, more urgent level, so
    /// no entry is visited twice or skipped.
    fn tick_aging(&mut self, curr: Pid) {
        let Some(ctx) = self.tasks.get(&curr) else {
            return;
        };
        // Read after the expiry phase: a rotation may just have reset the
        // running task's level to base.
        let start = ctx.level().0 + 1;
        let threshold = self.tunables.age_threshold();

        for level in (start..NR_LEVELS).map(Level) {
            for pid in self.rq.level_pids(level) {
                let Some(waiting) = self.tasks.get_mut(&pid) else {
                    continue;
                };
                waiting.age_count += 1;
                if waiting.age_count < threshold {
                    continue;
                }
                let from = waiting.level();
                waiting.promote();
                let to = waiting.level();
                self.stats.nr_promotions += 1;
                self.emit(SchedEvent::Promoted { pid, from, to });
                self.dequeue(pid);
                self.enqueue(pid);
            }
        }
    }

    /// The currently configured round-robin interval for a task. Purely
    /// informational.
    pub fn rr_interval(&self, _pid: Pid) -> Tick {
        self.tunables.timeslice()
    }

    // Inspection helpers for the host and for tests.

    pub fn current(&self) -> Option<Pid> {
        self.rq.current
    }

    /// Whether the task is linked into a level's queue.
    pub fn is_queued(&self, pid: Pid) -> bool {
        self.tasks.get(&pid).is_some_and(|c| c.location.is_some())
    }

    pub fn task(&self, pid: Pid) -> Option<&TaskCtx> {
        self.tasks.get(&pid)
    }

    pub fn nr_runnable(&self) -> usize {
        self.rq.nr_runnable()
    }

    pub fn level_len(&self, level: Level) -> usize {
        self.rq.level_len(level)
    }

    pub fn stats(&self) -> &SchedStats {
        &self.stats
    }

    pub fn tunables(&self) -> &Arc<Tunables> {
        &self.tunables
    }
}
