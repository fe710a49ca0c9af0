//! Structured scheduling events.
//!
//! Every externally observable scheduling action is reported to an
//! `EventSink` injected by the host, with the operation, the task and the
//! level involved. `EventLog` is a recording sink used by the tests and
//! the demo binary.

use std::fmt;

use crate::types::{Level, Pid};

/// A single scheduling action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    /// A task was linked into a level's queue.
    Enqueued { pid: Pid, level: Level },
    /// A task left the ready state. `prio_reset` reports whether its
    /// dynamic priority reverted to base.
    Dequeued { pid: Pid, prio_reset: bool },
    /// The running task voluntarily moved to the tail of its level.
    Yielded { pid: Pid },
    /// An arriving task is more urgent than the running one; the host was
    /// asked to reschedule.
    PreemptRequested { curr: Pid, by: Pid },
    /// A task was returned as the next to run.
    Picked { pid: Pid, level: Level },
    /// The running task exhausted its timeslice and was rotated.
    TimesliceExpired { pid: Pid },
    /// A waiting task hit the age threshold and moved one level up.
    Promoted { pid: Pid, from: Level, to: Level },
}

impl fmt::Display for SchedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedEvent::Enqueued { pid, level } => write!(f, "enqueue: {pid} at {level}"),
            SchedEvent::Dequeued { pid, prio_reset } => {
                write!(f, "dequeue: {pid} (prio_reset={prio_reset})")
            }
            SchedEvent::Yielded { pid } => write!(f, "yield: {pid}"),
            SchedEvent::PreemptRequested { curr, by } => {
                write!(f, "preempt: {curr} by {by}")
            }
            SchedEvent::Picked { pid, level } => write!(f, "pick_next: {pid} at {level}"),
            SchedEvent::TimesliceExpired { pid } => write!(f, "timesliced: {pid}"),
            SchedEvent::Promoted { pid, from, to } => {
                write!(f, "aging: {pid} {from} -> {to}")
            }
        }
    }
}

/// Host-injected observability hook.
pub trait EventSink {
    fn event(&mut self, ev: &SchedEvent);
}

/// A shared sink handle: the host keeps one clone for inspection while the
/// scheduler feeds the other.
impl<T: EventSink> EventSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn event(&mut self, ev: &SchedEvent) {
        self.borrow_mut().event(ev);
    }
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn event(&mut self, _ev: &SchedEvent) {}
}

/// Sink that records every event in order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SchedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn events(&self) -> &[SchedEvent] {
        &self.events
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&SchedEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn event(&mut self, ev: &SchedEvent) {
        self.events.push(ev.clone());
    }
}
