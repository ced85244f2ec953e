//! Protothread contract consumed by the wait operations.
//!
//! A protothread is a state machine that the host re-invokes once per
//! scheduling step. It suspends by returning [`PtState::Waiting`] and keeps
//! everything it needs across steps in its own fields. Wait sites report
//! through [`WaitStatus`], and [`pt_wait!`](crate::pt_wait) turns a pending
//! wait into an early return from [`Protothread::resume`].

/// Result of running a protothread for one scheduling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PtState {
    /// Blocked on a wait; resume on the next step.
    Waiting,
    /// Voluntarily gave up the step; resume on the next step.
    Yielded,
    /// Exited early. Will not be resumed.
    Exited,
    /// Ran to completion. Will not be resumed.
    Ended,
}

impl PtState {
    /// Returns true if the thread should be resumed again.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, PtState::Waiting | PtState::Yielded)
    }
}

/// A stackless cooperative routine.
pub trait Protothread {
    /// Runs until the next suspension point or the end of the routine.
    fn resume(&mut self) -> PtState;
}

/// Outcome of evaluating a wait site once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitStatus<R> {
    /// Predicate still false. Suspend and re-check next step.
    Pending,
    /// Predicate true. Continue past the wait point.
    Ready(R),
}

impl<R> WaitStatus<R> {
    /// Returns true if the wait is over.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, WaitStatus::Ready(_))
    }

    /// Returns true if the thread must suspend.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, WaitStatus::Pending)
    }

    /// Maps the ready value.
    #[inline]
    pub fn map<U, F: FnOnce(R) -> U>(self, f: F) -> WaitStatus<U> {
        match self {
            WaitStatus::Pending => WaitStatus::Pending,
            WaitStatus::Ready(value) => WaitStatus::Ready(f(value)),
        }
    }

    /// Returns the ready value, if any.
    #[inline]
    pub fn ready(self) -> Option<R> {
        match self {
            WaitStatus::Pending => None,
            WaitStatus::Ready(value) => Some(value),
        }
    }
}

/// Suspends until `predicate` holds.
#[inline]
pub fn wait_until(predicate: bool) -> WaitStatus<()> {
    if predicate {
        WaitStatus::Ready(())
    } else {
        WaitStatus::Pending
    }
}

/// Evaluates a [`WaitStatus`], returning [`PtState::Waiting`] from the
/// enclosing function while it is pending.
///
/// ```ignore
/// fn resume(&mut self) -> PtState {
///     pt_wait!(self.delay.poll(&SystemTick));
///     self.led.toggle();
///     PtState::Ended
/// }
/// ```
#[macro_export]
macro_rules! pt_wait {
    ($status:expr) => {
        match $status {
            $crate::WaitStatus::Ready(value) => value,
            $crate::WaitStatus::Pending => return $crate::PtState::Waiting,
        }
    };
}
