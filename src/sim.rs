//! Deterministic single-processor dispatcher harness.
//!
//! The policy itself never performs a context switch; it only answers
//! questions. This module supplies the host side of the contract for tests
//! and the demo binary: it owns a `Scheduler`, tracks which task occupies
//! the processor, and performs the run/ready transitions (a picked task is
//! dequeued before it runs, a displaced task is enqueued back).

use crate::sched::Scheduler;
use crate::types::{Pid, Tick};

/// Drives one `Scheduler` through the host-side state machine.
pub struct Dispatcher {
    sched: Scheduler,
    now: Tick,
}

impl Dispatcher {
    pub fn new(sched: Scheduler) -> Self {
        Dispatcher { sched, now: 0 }
    }

    /// A new task enters the system and becomes runnable. May preempt the
    /// running task; fills an idle processor immediately.
    pub fn spawn(&mut self, pid: Pid, prio: i32) {
        self.sched.enable(pid, prio);
        self.sched.enqueue(pid);
        match self.sched.current() {
            Some(_) => {
                if self.sched.check_preempt(pid) {
                    self.reschedule();
                }
            }
            None => self.reschedule(),
        }
    }

    /// An already-known task wakes up again.
    pub fn wake(&mut self, pid: Pid) {
        self.sched.enqueue(pid);
        match self.sched.current() {
            Some(_) => {
                if self.sched.check_preempt(pid) {
                    self.reschedule();
                }
            }
            None => self.reschedule(),
        }
    }

    /// The task blocks (or sleeps) and leaves the runnable state.
    pub fn block(&mut self, pid: Pid) {
        let was_running = self.sched.current() == Some(pid);
        self.sched.dequeue(pid);
        if was_running {
            self.sched.put_prev(pid);
            self.reschedule();
        }
    }

    /// The task exits and is forgotten.
    pub fn exit(&mut self, pid: Pid) {
        let was_running = self.sched.current() == Some(pid);
        self.sched.disable(pid);
        if was_running {
            self.reschedule();
        }
    }

    /// The running task yields the processor voluntarily.
    pub fn yield_now(&mut self) {
        if self.sched.current().is_none() {
            return;
        }
        self.sched.yield_task();
        self.reschedule();
    }

    /// One timer tick elapses on the running task.
    pub fn tick(&mut self) {
        self.now += 1;
        if self.sched.current().is_none() {
            return;
        }
        if self.sched.task_tick() {
            self.reschedule();
        }
    }

    pub fn run_ticks(&mut self, n: Tick) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Re-evaluate which task should occupy the processor.
    ///
    /// A displaced task that is still runnable but not yet linked (it was
    /// preempted, not rotated) goes back to the tail of its level before
    /// the pick, so the pick sees the full ready set.
    fn reschedule(&mut self) {
        if let Some(prev) = self.sched.current() {
            self.sched.put_prev(prev);
            if !self.sched.is_queued(prev) {
                self.sched.enqueue(prev);
            }
        }
        if let Some(next) = self.sched.pick_next() {
            // Ready-to-run transition: the picked task leaves the queue.
            self.sched.dequeue(next);
            self.sched.set_current(next);
        }
    }

    pub fn current(&self) -> Option<Pid> {
        self.sched.current()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn sched(&self) -> &Scheduler {
        &self.sched
    }

    pub fn sched_mut(&mut self) -> &mut Scheduler {
        &mut self.sched
    }
}
