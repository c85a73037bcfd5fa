//! Simulation time.
//!
//! The event queue only needs a total order on time values and a way to
//! compute "`n` ticks later" for solvers. [`SimTime`] captures exactly
//! that, so plain integers, floating-point seconds and the
//! [`VirtualTime`] tick counter all work as the time parameter `T`.

use std::cmp::Ordering;

/// A totally ordered simulation timestamp.
pub trait SimTime: Copy + std::fmt::Debug {
    /// Total order used by the event queue.
    fn cmp_time(&self, other: &Self) -> Ordering;

    /// The timestamp `ticks` units after `self`, saturating at the maximum.
    fn delayed(self, ticks: u32) -> Self;
}

macro_rules! impl_sim_time_int {
    ($($t:ty),*) => {$(
        impl SimTime for $t {
            #[inline]
            fn cmp_time(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline]
            fn delayed(self, ticks: u32) -> Self {
                self.saturating_add(<$t>::try_from(ticks).unwrap_or(<$t>::MAX))
            }
        }
    )*};
}

impl_sim_time_int!(i32, i64, u32, u64, usize);

impl SimTime for f32 {
    #[inline]
    fn cmp_time(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    #[inline]
    fn delayed(self, ticks: u32) -> Self {
        self + ticks as f32
    }
}

impl SimTime for f64 {
    #[inline]
    fn cmp_time(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    #[inline]
    fn delayed(self, ticks: u32) -> Self {
        self + f64::from(ticks)
    }
}

/// A logical tick in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualTime(u64);

impl VirtualTime {
    /// The zero-point of simulation time.
    pub const ZERO: VirtualTime = VirtualTime(0);

    /// Create a new `VirtualTime` from a raw tick value.
    #[inline]
    pub fn new(ticks: u64) -> Self {
        VirtualTime(ticks)
    }

    /// Return the raw tick value.
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// Advance time by `delta` ticks.
    /// Returns `None` on overflow.
    #[inline]
    pub fn advance(self, delta: u64) -> Option<VirtualTime> {
        self.0.checked_add(delta).map(VirtualTime)
    }

    /// Returns the duration (in ticks) between two points in time.
    /// Returns `None` if `other` is after `self`.
    #[inline]
    pub fn duration_since(self, other: VirtualTime) -> Option<u64> {
        self.0.checked_sub(other.0)
    }
}

impl SimTime for VirtualTime {
    #[inline]
    fn cmp_time(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    fn delayed(self, ticks: u32) -> Self {
        VirtualTime(self.0.saturating_add(u64::from(ticks)))
    }
}

impl std::fmt::Display for VirtualTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T={}", self.0)
    }
}
