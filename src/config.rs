//! Tick rate configuration and duration conversion.

use crate::time::Tick;
use crate::types::TimeoutError;

/// Frequency at which the host advances the tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRate {
    hz: u32,
}

impl TickRate {
    /// 1 kHz, one tick per millisecond.
    pub const DEFAULT: TickRate = TickRate { hz: 1000 };

    /// Creates a tick rate of `hz` ticks per second.
    pub const fn new(hz: u32) -> Result<Self, TimeoutError> {
        if hz == 0 {
            return Err(TimeoutError::ZeroTickRate);
        }
        Ok(Self { hz })
    }

    /// Ticks per second.
    #[inline]
    pub const fn hz(&self) -> u32 {
        self.hz
    }

    /// Converts milliseconds to ticks, rounding up to a whole tick.
    ///
    /// # Errors
    /// `DurationOutOfRange` if the result exceeds `T::MAX_DURATION`.
    pub fn ticks_from_millis<T: Tick>(&self, millis: u64) -> Result<T, TimeoutError> {
        let ticks = (millis as u128 * self.hz as u128).div_ceil(1000);
        to_duration(ticks)
    }

    /// Converts a [`core::time::Duration`] to ticks, rounding up to a whole tick.
    ///
    /// # Errors
    /// `DurationOutOfRange` if the result exceeds `T::MAX_DURATION`.
    pub fn ticks_from_duration<T: Tick>(
        &self,
        duration: core::time::Duration,
    ) -> Result<T, TimeoutError> {
        let ticks = (duration.as_nanos() * self.hz as u128).div_ceil(1_000_000_000);
        to_duration(ticks)
    }

    /// Converts ticks to whole milliseconds, rounding down.
    ///
    /// Saturates at `u64::MAX` when the result does not fit.
    pub fn millis_from_ticks<T: Tick>(&self, ticks: T) -> u64 {
        let millis = ticks.as_u64() as u128 * 1000 / self.hz as u128;
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Checks that `duration` compares unambiguously for its width.
///
/// # Errors
/// `DurationOutOfRange` if `duration > T::MAX_DURATION`.
pub fn check_duration<T: Tick>(duration: T) -> Result<T, TimeoutError> {
    if duration > T::MAX_DURATION {
        return Err(TimeoutError::DurationOutOfRange {
            requested: duration.as_u64(),
            max: T::MAX_DURATION.as_u64(),
        });
    }
    Ok(duration)
}

fn to_duration<T: Tick>(ticks: u128) -> Result<T, TimeoutError> {
    let max = T::MAX_DURATION.as_u64();
    if ticks > max as u128 {
        return Err(TimeoutError::DurationOutOfRange {
            requested: u64::try_from(ticks).unwrap_or(u64::MAX),
            max,
        });
    }
    // `ticks <= max` and `max` came from `T`, so this always narrows.
    T::try_from_u64(ticks as u64).ok_or(TimeoutError::DurationOutOfRange {
        requested: ticks as u64,
        max,
    })
}
