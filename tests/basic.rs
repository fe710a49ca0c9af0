use rr_aging::*;

mod common;

/// Tasks enqueued at the same level come back in arrival order.
#[test]
fn test_fifo_within_level() {
    let mut sched = common::sched(10, 30);
    for pid in 1..=3 {
        sched.enable(Pid(pid), common::prio(2));
        sched.enqueue(Pid(pid));
    }

    for pid in 1..=3 {
        assert_eq!(sched.pick_next(), Some(Pid(pid)));
        sched.dequeue(Pid(pid));
    }
    assert_eq!(sched.pick_next(), None);
}

/// With two non-empty levels, the more urgent one always wins the pick.
#[test]
fn test_level_priority_ordering() {
    let mut sched = common::sched(10, 30);
    sched.enable(Pid(1), common::prio(3));
    sched.enqueue(Pid(1));
    sched.enable(Pid(2), common::prio(1));
    sched.enqueue(Pid(2));
    sched.enable(Pid(3), common::prio(3));
    sched.enqueue(Pid(3));

    assert_eq!(sched.pick_next(), Some(Pid(2)));
    sched.dequeue(Pid(2));
    assert_eq!(sched.pick_next(), Some(Pid(1)));
}

/// An empty run queue yields the "no task" sentinel, not an error.
#[test]
fn test_pick_next_empty() {
    let mut sched = common::sched(10, 30);
    assert_eq!(sched.pick_next(), None);
    assert_eq!(sched.nr_runnable(), 0);
}

/// pick_next peeks: the head task stays linked until the host dequeues it.
#[test]
fn test_pick_next_does_not_remove() {
    let mut sched = common::sched(10, 30);
    sched.enable(Pid(1), common::prio(0));
    sched.enqueue(Pid(1));

    assert_eq!(sched.pick_next(), Some(Pid(1)));
    assert_eq!(sched.pick_next(), Some(Pid(1)));
    assert_eq!(sched.nr_runnable(), 1);
    assert!(sched.is_queued(Pid(1)));
}

/// Out-of-band raw priorities are clamped into the 5-level space instead
/// of indexing out of bounds.
#[test]
fn test_out_of_range_priority_is_clamped() {
    let mut sched = common::sched(10, 30);
    sched.enable(Pid(1), CLASS_PRIO_MIN - 50);
    sched.enqueue(Pid(1));
    sched.enable(Pid(2), CLASS_PRIO_MIN + 50);
    sched.enqueue(Pid(2));

    assert_eq!(sched.level_len(Level(0)), 1);
    assert_eq!(sched.level_len(Level(4)), 1);
    assert_eq!(sched.pick_next(), Some(Pid(1)));
}

/// A more urgent arrival raises the reschedule signal; an equal or less
/// urgent one does not.
#[test]
fn test_check_preempt() {
    let (mut sched, log) = common::sched_with_log(10, 30);
    sched.enable(Pid(1), common::prio(2));
    sched.enqueue(Pid(1));
    sched.dequeue(Pid(1));
    sched.set_current(Pid(1));

    sched.enable(Pid(2), common::prio(2));
    sched.enqueue(Pid(2));
    assert!(!sched.check_preempt(Pid(2)));

    sched.enable(Pid(3), common::prio(0));
    sched.enqueue(Pid(3));
    assert!(sched.check_preempt(Pid(3)));

    // The signal is a pure comparison: nothing moved.
    assert_eq!(sched.current(), Some(Pid(1)));
    assert_eq!(sched.nr_runnable(), 2);
    assert_eq!(
        log.borrow()
            .count(|e| matches!(e, SchedEvent::PreemptRequested { .. })),
        1
    );
}

/// Preemption end to end: the arrival displaces the running task, which
/// goes back to the tail of its level.
#[test]
fn test_preemption_switches_running_task() {
    let mut host = Dispatcher::new(common::sched(10, 30));
    host.spawn(Pid(1), common::prio(2));
    assert_eq!(host.current(), Some(Pid(1)));

    host.spawn(Pid(2), common::prio(0));
    assert_eq!(host.current(), Some(Pid(2)));
    assert!(host.sched().is_queued(Pid(1)));
    assert_eq!(host.sched().stats().nr_preempt_signals, 1);
}

/// rr_interval reports the live timeslice value, including runtime
/// retuning.
#[test]
fn test_rr_interval_tracks_tunable() {
    let sched = common::sched(10, 30);
    assert_eq!(sched.rr_interval(Pid(1)), 10);
    sched.tunables().set_timeslice(25);
    assert_eq!(sched.rr_interval(Pid(1)), 25);
}

/// A task that blocked mid-slice resumes with its remaining quantum; only
/// an exhausted quantum is reset on enqueue.
#[test]
fn test_partial_quantum_survives_block() {
    let mut host = Dispatcher::new(common::sched(10, 30));
    host.spawn(Pid(1), common::prio(0));
    host.run_ticks(4);
    assert_eq!(host.sched().task(Pid(1)).unwrap().quantum, 4);

    host.block(Pid(1));
    host.wake(Pid(1));
    assert_eq!(host.sched().task(Pid(1)).unwrap().quantum, 4);
    assert_eq!(host.current(), Some(Pid(1)));

    // Six more ticks exhaust the slice and start a fresh one.
    host.run_ticks(6);
    assert_eq!(host.sched().stats().nr_timeslice_expirations, 1);
    assert_eq!(host.sched().task(Pid(1)).unwrap().quantum, 0);
}

/// Exiting tasks disappear from the queue and from the processor.
#[test]
fn test_exit_releases_processor() {
    let mut host = Dispatcher::new(common::sched(10, 30));
    host.spawn(Pid(1), common::prio(1));
    host.spawn(Pid(2), common::prio(1));
    assert_eq!(host.current(), Some(Pid(1)));

    host.exit(Pid(1));
    assert_eq!(host.current(), Some(Pid(2)));
    assert!(host.sched().task(Pid(1)).is_none());

    host.exit(Pid(2));
    assert_eq!(host.current(), None);
    assert_eq!(host.sched().nr_runnable(), 0);
}
