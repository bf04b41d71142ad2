//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative number of half-steps a solver has marched since setup.
///
/// `HalfStepId(0)` is the seeded initial condition. Each half-step moves the
/// solution from one [`Plane`](crate::Plane) to the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfStepId(pub u64);

impl HalfStepId {
    /// The id reached after marching `steps` more half-steps.
    pub fn advanced_by(self, steps: u64) -> Self {
        Self(self.0 + steps)
    }
}

impl fmt::Display for HalfStepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HalfStepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one curve on a drawable.
///
/// Curves are assigned sequential ids in plotting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub u32);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CurveId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`TimerId`] allocation.
static TIMER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a recurring timer.
///
/// Allocated from a monotonic atomic counter via [`TimerId::next`], so two
/// timers never share an id even when created by different schedulers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Allocate a fresh, unique timer id.
    pub fn next() -> Self {
        Self(TIMER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
