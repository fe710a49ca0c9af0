#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use rr_aging::{EventLog, Level, Scheduler, Tick, Tunables};

/// Scheduler with the given tunables and no event recording.
pub fn sched(timeslice: Tick, age_threshold: Tick) -> Scheduler {
    Scheduler::new(Arc::new(Tunables::new(timeslice, age_threshold)))
}

/// Scheduler plus a shared handle to its recorded event stream.
pub fn sched_with_log(timeslice: Tick, age_threshold: Tick) -> (Scheduler, Rc<RefCell<EventLog>>) {
    let log = Rc::new(RefCell::new(EventLog::new()));
    let sched = sched(timeslice, age_threshold).with_sink(Box::new(log.clone()));
    (sched, log)
}

/// Raw priority for a level index.
pub fn prio(level: usize) -> i32 {
    Level(level).to_prio()
}
