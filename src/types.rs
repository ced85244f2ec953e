//! Core types shared by the wait operations.

/// Progress of a single wait site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitState {
    /// Not polled yet. The baseline is captured on the first poll.
    #[default]
    NotStarted,

    /// Baseline captured, predicate still false.
    Waiting,

    /// Predicate became true. Terminal until the wait is reset.
    Satisfied,
}

/// Which branch ended a condition-or-timeout wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// The caller's condition held.
    Condition,

    /// The timeout elapsed first.
    TimedOut,
}

impl WaitOutcome {
    /// Returns true if the wait ended by timeout.
    #[inline]
    pub fn is_timeout(self) -> bool {
        self == WaitOutcome::TimedOut
    }
}

/// Timing configuration and validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutError {
    /// Tick rate of zero Hz.
    ZeroTickRate,

    /// Duration does not fit below half the counter range.
    DurationOutOfRange {
        /// Requested duration in ticks.
        requested: u64,
        /// Longest unambiguous duration for the counter width.
        max: u64,
    },
}

impl core::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimeoutError::ZeroTickRate => {
                write!(f, "tick rate must be non-zero")
            }
            TimeoutError::DurationOutOfRange { requested, max } => {
                write!(
                    f,
                    "duration of {} ticks exceeds half the counter range (max {})",
                    requested, max
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimeoutError {}
