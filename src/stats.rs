//! Operation counters for the scheduler core.

use std::fmt;

/// Monotonic counters, one per scheduling action. Useful for spotting
/// pathological behavior (e.g. a promotion storm) without a full event
/// trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedStats {
    pub nr_enqueues: u64,
    pub nr_dequeues: u64,
    pub nr_yields: u64,
    pub nr_picks: u64,
    pub nr_ticks: u64,
    pub nr_timeslice_expirations: u64,
    pub nr_promotions: u64,
    pub nr_preempt_signals: u64,
    pub nr_prio_resets: u64,
}

impl fmt::Display for SchedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scheduler stats:")?;
        writeln!(f, "  nr_enqueues:              {}", self.nr_enqueues)?;
        writeln!(f, "  nr_dequeues:              {}", self.nr_dequeues)?;
        writeln!(f, "  nr_yields:                {}", self.nr_yields)?;
        writeln!(f, "  nr_picks:                 {}", self.nr_picks)?;
        writeln!(f, "  nr_ticks:                 {}", self.nr_ticks)?;
        writeln!(f, "  nr_timeslice_expirations: {}", self.nr_timeslice_expirations)?;
        writeln!(f, "  nr_promotions:            {}", self.nr_promotions)?;
        writeln!(f, "  nr_preempt_signals:       {}", self.nr_preempt_signals)?;
        write!(f, "  nr_prio_resets:           {}", self.nr_prio_resets)
    }
}
