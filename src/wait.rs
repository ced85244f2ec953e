//! Suspending delay and condition-or-timeout waits.
//!
//! Each wait site owns one of these values in its protothread's state. The
//! first poll captures the baseline; every later poll re-evaluates the
//! predicate against the same baseline until it holds.

use crate::config::check_duration;
use crate::pt::WaitStatus;
use crate::time::{Tick, TickSource};
use crate::timer::PtTimer;
use crate::types::{TimeoutError, WaitOutcome, WaitState};

/// Suspends a protothread for a fixed number of ticks.
///
/// ```ignore
/// struct Blinky {
///     delay: Delay<u32>,
/// }
///
/// impl Protothread for Blinky {
///     fn resume(&mut self) -> PtState {
///         pt_wait!(self.delay.poll(&MILLIS));
///         self.delay.reset();
///         toggle_led();
///         PtState::Yielded
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Delay<T> {
    timer: PtTimer<T>,
    duration: T,
    state: WaitState,
}

impl<T: Tick> Delay<T> {
    /// Creates a delay of `duration` ticks.
    ///
    /// `duration` should stay below `2^(W-1)`; longer values are accepted
    /// but the expiry check may alias. Use [`checked`](Self::checked) to
    /// reject them.
    pub const fn new(duration: T) -> Self {
        Self {
            timer: PtTimer::new(T::ZERO),
            duration,
            state: WaitState::NotStarted,
        }
    }

    /// Creates a delay, rejecting durations that would compare ambiguously.
    ///
    /// # Errors
    /// `DurationOutOfRange` if `duration > T::MAX_DURATION`.
    pub fn checked(duration: T) -> Result<Self, TimeoutError> {
        check_duration(duration).map(Self::new)
    }

    /// Captures the baseline now instead of on the first poll.
    pub fn start<S: TickSource<T>>(&mut self, source: &S) {
        self.timer.init(source);
        self.state = WaitState::Waiting;
    }

    /// Evaluates the delay for the current scheduling step.
    ///
    /// Returns `Ready(())` on the first poll where `duration` ticks have
    /// passed since the baseline, and on every poll after that until
    /// [`reset`](Self::reset).
    pub fn poll<S: TickSource<T>>(&mut self, source: &S) -> WaitStatus<()> {
        match self.state {
            WaitState::Satisfied => return WaitStatus::Ready(()),
            WaitState::NotStarted => self.start(source),
            WaitState::Waiting => {}
        }

        if self.timer.is_expired(source, self.duration) {
            self.state = WaitState::Satisfied;

            #[cfg(feature = "defmt")]
            defmt::trace!(
                "delay of {} ticks expired (baseline {})",
                self.duration.as_u64(),
                self.timer.baseline().as_u64()
            );

            WaitStatus::Ready(())
        } else {
            WaitStatus::Pending
        }
    }

    /// Returns the wait site to `NotStarted`; the next poll starts a fresh delay.
    #[inline]
    pub fn reset(&mut self) {
        self.state = WaitState::NotStarted;
    }

    /// Resets and changes the duration of the next delay.
    pub fn reset_with(&mut self, duration: T) {
        self.duration = duration;
        self.reset();
    }

    /// Current state of the wait site.
    #[inline]
    pub fn state(&self) -> WaitState {
        self.state
    }

    /// Configured duration in ticks.
    #[inline]
    pub fn duration(&self) -> T {
        self.duration
    }

    /// The underlying timer record.
    #[inline]
    pub fn timer(&self) -> &PtTimer<T> {
        &self.timer
    }

    /// Ticks left, or `None` if the delay has not started.
    pub fn remaining<S: TickSource<T>>(&self, source: &S) -> Option<T> {
        match self.state {
            WaitState::NotStarted => None,
            WaitState::Waiting => Some(self.timer.remaining(source, self.duration)),
            WaitState::Satisfied => Some(T::ZERO),
        }
    }
}

/// Suspends a protothread until a condition holds or a timeout elapses.
///
/// The condition is evaluated before the timeout on every poll, so when
/// both hold on the same step the outcome is [`WaitOutcome::Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitOrTimeout<T> {
    delay: Delay<T>,
    outcome: Option<WaitOutcome>,
}

impl<T: Tick> WaitOrTimeout<T> {
    /// Creates a wait with a timeout of `duration` ticks.
    pub const fn new(duration: T) -> Self {
        Self {
            delay: Delay::new(duration),
            outcome: None,
        }
    }

    /// Creates a wait, rejecting timeouts that would compare ambiguously.
    ///
    /// # Errors
    /// `DurationOutOfRange` if `duration > T::MAX_DURATION`.
    pub fn checked(duration: T) -> Result<Self, TimeoutError> {
        check_duration(duration).map(Self::new)
    }

    /// Captures the baseline now instead of on the first poll.
    pub fn start<S: TickSource<T>>(&mut self, source: &S) {
        self.delay.start(source);
        self.outcome = None;
    }

    /// Evaluates `condition() || timeout` for the current scheduling step.
    ///
    /// `condition` should be free of side effects; it runs once per poll
    /// while the wait is in progress and not at all once it is satisfied.
    pub fn poll<S, F>(&mut self, source: &S, condition: F) -> WaitStatus<WaitOutcome>
    where
        S: TickSource<T>,
        F: FnOnce() -> bool,
    {
        if let Some(outcome) = self.outcome {
            return WaitStatus::Ready(outcome);
        }
        if self.delay.state == WaitState::NotStarted {
            self.delay.start(source);
        }

        let outcome = if condition() {
            WaitOutcome::Condition
        } else if self.delay.timer.is_expired(source, self.delay.duration) {
            WaitOutcome::TimedOut
        } else {
            return WaitStatus::Pending;
        };

        self.delay.state = WaitState::Satisfied;
        self.outcome = Some(outcome);

        #[cfg(feature = "defmt")]
        defmt::trace!("wait ended: {}", outcome);

        WaitStatus::Ready(outcome)
    }

    /// Returns the wait site to `NotStarted`.
    pub fn reset(&mut self) {
        self.delay.reset();
        self.outcome = None;
    }

    /// Resets and changes the timeout of the next wait.
    pub fn reset_with(&mut self, duration: T) {
        self.delay.reset_with(duration);
        self.outcome = None;
    }

    /// Current state of the wait site.
    #[inline]
    pub fn state(&self) -> WaitState {
        self.delay.state
    }

    /// Which branch ended the wait, once satisfied.
    #[inline]
    pub fn outcome(&self) -> Option<WaitOutcome> {
        self.outcome
    }

    /// Configured timeout in ticks.
    #[inline]
    pub fn duration(&self) -> T {
        self.delay.duration
    }

    /// The underlying timer record.
    #[inline]
    pub fn timer(&self) -> &PtTimer<T> {
        &self.delay.timer
    }

    /// Ticks left before the timeout, or `None` if the wait has not started.
    ///
    /// A wait ended by its condition keeps counting down against its
    /// baseline; a timed-out wait reports zero.
    pub fn remaining<S: TickSource<T>>(&self, source: &S) -> Option<T> {
        match self.outcome {
            Some(WaitOutcome::Condition) => {
                Some(self.delay.timer.remaining(source, self.delay.duration))
            }
            _ => self.delay.remaining(source),
        }
    }
}
