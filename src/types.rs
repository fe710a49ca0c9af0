//! Newtype wrappers and type aliases for domain concepts.
//!
//! Newtypes for task identity and priority levels prevent silent type
//! confusion between the host's raw priority space and the scheduler's
//! 5-level index space. Plain aliases cover quantities (ticks) that need
//! arithmetic without ceremony.

use std::fmt;

/// Number of discrete priority levels. Level 0 is the most urgent.
pub const NR_LEVELS: usize = 5;

/// Lowest raw priority value served by this scheduling class.
///
/// The class occupies the contiguous raw-priority band
/// `[CLASS_PRIO_MIN, CLASS_PRIO_MIN + NR_LEVELS - 1]` (131..=135), mapped
/// to levels 0..=4. The band matches the host convention of placing this
/// class directly below the real-time priority range.
pub const CLASS_PRIO_MIN: i32 = 131;

/// One unit of the periodic scheduling timer.
pub type Tick = u64;

/// Process identifier. Opaque to the scheduler; used for queue linkage,
/// equality and logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pid(pub i32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the five priority buckets, 0 most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(pub usize);

impl Level {
    /// Map a raw host priority into the 5-level index space.
    ///
    /// A raw priority outside the class band is a defect in the caller,
    /// but must never cause an out-of-bounds queue index: values are
    /// clamped to the nearest valid level. Saturating arithmetic keeps
    /// the extreme ends of the i32 range on the correct side of the band.
    pub fn from_prio(prio: i32) -> Level {
        let idx = prio
            .saturating_sub(CLASS_PRIO_MIN)
            .clamp(0, NR_LEVELS as i32 - 1);
        Level(idx as usize)
    }

    /// The raw priority corresponding to this level.
    pub fn to_prio(self) -> i32 {
        CLASS_PRIO_MIN + self.0 as i32
    }

    /// Whether this level is strictly more urgent than `other`.
    pub fn more_urgent_than(self, other: Level) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prio_to_level_band() {
        assert_eq!(Level::from_prio(CLASS_PRIO_MIN), Level(0));
        assert_eq!(Level::from_prio(CLASS_PRIO_MIN + 2), Level(2));
        assert_eq!(Level::from_prio(CLASS_PRIO_MIN + 4), Level(4));
    }

    #[test]
    fn test_prio_to_level_clamps_below_band() {
        assert_eq!(Level::from_prio(CLASS_PRIO_MIN - 1), Level(0));
        assert_eq!(Level::from_prio(0), Level(0));
        assert_eq!(Level::from_prio(i32::MIN), Level(0));
    }

    #[test]
    fn test_prio_to_level_clamps_above_band() {
        assert_eq!(Level::from_prio(CLASS_PRIO_MIN + 5), Level(4));
        assert_eq!(Level::from_prio(i32::MAX), Level(4));
    }

    #[test]
    fn test_level_to_prio_round_trips() {
        for i in 0..NR_LEVELS {
            assert_eq!(Level::from_prio(Level(i).to_prio()), Level(i));
        }
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Level(0).more_urgent_than(Level(1)));
        assert!(!Level(3).more_urgent_than(Level(3)));
        assert!(!Level(4).more_urgent_than(Level(0)));
    }
}
