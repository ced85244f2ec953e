//! Process-wide tick counter.
//!
//! The host owns the writer side: a periodic interrupt (or a periodic call
//! from the main loop) calls [`TickCounter::tick`]. Everything else only
//! reads. Each access runs inside a critical section, so a counter wider
//! than the platform's atomic access is never observed half-updated.
//!
//! ```ignore
//! use pt_timer::TickCounter;
//!
//! static MILLIS: TickCounter<u32> = TickCounter::new(0);
//!
//! #[exception]
//! fn SysTick() {
//!     MILLIS.tick();
//! }
//! ```

use crate::time::{Tick, TickSource};
use core::cell::Cell;
use critical_section::Mutex;

/// Default counter width, selected at build time with the `tick-*` features.
#[cfg(feature = "tick-u64")]
pub type DefaultTick = u64;

/// Default counter width, selected at build time with the `tick-*` features.
#[cfg(all(feature = "tick-u32", not(feature = "tick-u64")))]
pub type DefaultTick = u32;

/// Default counter width, selected at build time with the `tick-*` features.
#[cfg(all(
    feature = "tick-u16",
    not(any(feature = "tick-u32", feature = "tick-u64"))
))]
pub type DefaultTick = u16;

/// Default counter width, selected at build time with the `tick-*` features.
#[cfg(all(
    feature = "tick-u8",
    not(any(feature = "tick-u16", feature = "tick-u32", feature = "tick-u64"))
))]
pub type DefaultTick = u8;

/// Default counter width, selected at build time with the `tick-*` features.
#[cfg(not(any(
    feature = "tick-u8",
    feature = "tick-u16",
    feature = "tick-u32",
    feature = "tick-u64"
)))]
pub type DefaultTick = usize;

/// A wrapping tick counter with a single writer and many readers.
///
/// Usable in a `static`; the identifier is whatever name the host gives it.
pub struct TickCounter<T: Tick> {
    ticks: Mutex<Cell<T>>,
}

impl<T: Tick> TickCounter<T> {
    /// Creates a counter starting at `start`.
    pub const fn new(start: T) -> Self {
        Self {
            ticks: Mutex::new(Cell::new(start)),
        }
    }

    /// Advances the counter by one tick, wrapping at `2^W`.
    ///
    /// Call from the host's tick interrupt or periodic routine only.
    #[inline]
    pub fn tick(&self) {
        self.advance(T::ONE);
    }

    /// Advances the counter by `ticks`, wrapping at `2^W`.
    pub fn advance(&self, ticks: T) {
        critical_section::with(|cs| {
            let counter = self.ticks.borrow(cs);
            counter.set(counter.get().wrapping_add(ticks));
        });
    }

    /// Overwrites the counter value.
    ///
    /// Waits in progress see the jump as elapsed (or negative) time.
    pub fn set(&self, value: T) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(value));
    }

    /// Returns the current count.
    pub fn now(&self) -> T {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }
}

impl<T: Tick> TickSource<T> for TickCounter<T> {
    #[inline]
    fn now(&self) -> T {
        TickCounter::now(self)
    }
}

/// The crate's process-wide tick counter.
pub static TICKS: TickCounter<DefaultTick> = TickCounter::new(0);

/// Advances [`TICKS`] by one. Call from the host's tick interrupt.
#[inline]
pub fn tick() {
    TICKS.tick();
}

/// Returns the current value of [`TICKS`].
#[inline]
pub fn now() -> DefaultTick {
    TICKS.now()
}

/// Zero-sized [`TickSource`] reading [`TICKS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemTick;

impl TickSource<DefaultTick> for SystemTick {
    #[inline]
    fn now(&self) -> DefaultTick {
        TICKS.now()
    }
}
