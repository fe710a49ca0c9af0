//! Runtime-tunable scheduling parameters.
//!
//! The host may retune the timeslice and the age threshold at any time;
//! the scheduler core re-reads them on every decision and never caches a
//! value across calls, so a change takes effect at the next tick with no
//! restart.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::Tick;

/// Default round-robin timeslice, in ticks. At the conventional 1 ms tick
/// this is the classic 100 ms slice.
pub const DEFAULT_TIMESLICE: Tick = 100;

/// Default aging threshold: three full timeslices of waiting before a
/// queued task is promoted one level.
pub const DEFAULT_AGE_THRESHOLD: Tick = 3 * DEFAULT_TIMESLICE;

/// Shared tunable parameters.
///
/// Typically wrapped in an `Arc` so the host can hold one handle for
/// retuning while the scheduler holds another for reading.
#[derive(Debug)]
pub struct Tunables {
    timeslice: AtomicU64,
    age_threshold: AtomicU64,
}

impl Tunables {
    pub fn new(timeslice: Tick, age_threshold: Tick) -> Self {
        Tunables {
            timeslice: AtomicU64::new(timeslice),
            age_threshold: AtomicU64::new(age_threshold),
        }
    }

    /// Maximum ticks a task may run before being rotated to the tail of
    /// its level.
    pub fn timeslice(&self) -> Tick {
        self.timeslice.load(Ordering::Relaxed)
    }

    /// Ticks a waiting task must accumulate before being promoted one
    /// level toward higher urgency.
    pub fn age_threshold(&self) -> Tick {
        self.age_threshold.load(Ordering::Relaxed)
    }

    pub fn set_timeslice(&self, ticks: Tick) {
        self.timeslice.store(ticks, Ordering::Relaxed);
    }

    pub fn set_age_threshold(&self, ticks: Tick) {
        self.age_threshold.store(ticks, Ordering::Relaxed);
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Tunables::new(DEFAULT_TIMESLICE, DEFAULT_AGE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tunables::default();
        assert_eq!(t.timeslice(), DEFAULT_TIMESLICE);
        assert_eq!(t.age_threshold(), 3 * DEFAULT_TIMESLICE);
    }

    #[test]
    fn test_runtime_update_is_visible() {
        let t = Tunables::default();
        t.set_timeslice(5);
        t.set_age_threshold(12);
        assert_eq!(t.timeslice(), 5);
        assert_eq!(t.age_threshold(), 12);
    }
}
