//! Timer record and the wraparound-safe timeout predicate.

use crate::time::{Tick, TickSource};

/// Returns true once `duration` ticks have passed since `baseline`.
///
/// Elapsed time is `now - baseline` modulo `2^W`, so the result is exact
/// across counter wraparound provided both `duration` and the true elapsed
/// time are below `2^(W-1)`. Outside that range the comparison aliases and
/// may report either answer.
///
/// A zero `duration` is always expired.
#[inline]
pub fn expired<T: Tick>(baseline: T, now: T, duration: T) -> bool {
    now.wrapping_sub(baseline) >= duration
}

/// Tick value captured when a wait starts.
///
/// A plain value with no teardown. Keep it in storage that survives between
/// scheduling steps, since every re-check must read the same baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PtTimer<T> {
    baseline: T,
}

impl<T: Tick> PtTimer<T> {
    /// Creates a timer with an explicit baseline.
    #[inline]
    pub const fn new(baseline: T) -> Self {
        Self { baseline }
    }

    /// Creates a timer started at the source's current tick.
    #[inline]
    pub fn started<S: TickSource<T>>(source: &S) -> Self {
        Self::new(source.now())
    }

    /// Captures the current tick as baseline, restarting the timer.
    #[inline]
    pub fn init<S: TickSource<T>>(&mut self, source: &S) {
        self.baseline = source.now();
    }

    /// Returns the captured baseline.
    #[inline]
    pub fn baseline(&self) -> T {
        self.baseline
    }

    /// Ticks since the baseline, modulo `2^W`.
    #[inline]
    pub fn elapsed<S: TickSource<T>>(&self, source: &S) -> T {
        source.now().wrapping_sub(self.baseline)
    }

    /// Returns true once `duration` ticks have passed since [`init`](Self::init).
    #[inline]
    pub fn is_expired<S: TickSource<T>>(&self, source: &S, duration: T) -> bool {
        expired(self.baseline, source.now(), duration)
    }

    /// Ticks left until `duration` has passed, zero once expired.
    pub fn remaining<S: TickSource<T>>(&self, source: &S, duration: T) -> T {
        let elapsed = self.elapsed(source);
        if elapsed >= duration {
            T::ZERO
        } else {
            duration.wrapping_sub(elapsed)
        }
    }
}
