//! rr_aging - Priority-based multi-level round-robin scheduling with aging.
//!
//! This crate implements a single-processor scheduling policy: five
//! priority levels, FIFO within a level, round-robin rotation at a
//! configurable timeslice, and aging-based promotion so tasks waiting at
//! low-urgency levels cannot starve under sustained high-urgency load.
//!
//! # Architecture
//!
//! - **Scheduler**: the policy state machine (enqueue / dequeue / yield /
//!   check-preempt / pick-next / task-tick)
//! - **RunQueue**: five FIFO levels plus the running task, one per CPU
//! - **Tunables**: timeslice and age threshold, retunable at runtime
//! - **Events**: structured observability hook fed with every action
//! - **Dispatcher**: a host-side harness for driving the policy in tests
//!   and simulations
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use rr_aging::{Dispatcher, Pid, Scheduler, Tunables, CLASS_PRIO_MIN};
//!
//! let tunables = Arc::new(Tunables::new(3, 6));
//! let mut host = Dispatcher::new(Scheduler::new(tunables));
//!
//! host.spawn(Pid(1), CLASS_PRIO_MIN);     // level 0
//! host.spawn(Pid(2), CLASS_PRIO_MIN + 2); // level 2
//! host.run_ticks(10);
//! assert_eq!(host.current(), Some(Pid(1)));
//! ```
//!
//! The policy holds no locks and performs no I/O; the host serializes all
//! calls into one scheduler instance.

pub mod events;
pub mod rq;
pub mod sched;
pub mod sim;
pub mod stats;
pub mod task;
pub mod tunables;
pub mod types;

// Re-export the main public types for convenience.
pub use events::{EventLog, EventSink, NullSink, SchedEvent};
pub use rq::RunQueue;
pub use sched::Scheduler;
pub use sim::Dispatcher;
pub use stats::SchedStats;
pub use task::TaskCtx;
pub use tunables::{Tunables, DEFAULT_AGE_THRESHOLD, DEFAULT_TIMESLICE};
pub use types::{Level, Pid, Tick, CLASS_PRIO_MIN, NR_LEVELS};
