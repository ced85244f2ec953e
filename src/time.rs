//! Tick width abstraction and time source trait.
//!
//! A tick counter of width W lives in `[0, 2^W)` and wraps silently. All
//! elapsed-time arithmetic in this crate is modular, so it stays correct
//! across wraparound as long as the compared spans are shorter than half
//! the counter range.

/// Unsigned integer usable as a tick counter.
///
/// Implemented for `u8`, `u16`, `u32`, `u64` and `usize`.
pub trait Tick: Copy + Default + Ord + core::fmt::Debug {
    /// Zero ticks.
    const ZERO: Self;

    /// One tick.
    const ONE: Self;

    /// Counter width in bits.
    const BITS: u32;

    /// Longest duration that compares unambiguously, `2^(W-1) - 1`.
    const MAX_DURATION: Self;

    /// Addition modulo `2^W`.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Subtraction modulo `2^W`.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Widens the value to `u64`.
    fn as_u64(self) -> u64;

    /// Narrows a `u64`, returns `None` if it does not fit.
    fn try_from_u64(value: u64) -> Option<Self>;
}

macro_rules! impl_tick {
    ($($t:ty),*) => {
        $(
            impl Tick for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const BITS: u32 = <$t>::BITS;
                const MAX_DURATION: Self = <$t>::MAX >> 1;

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$t>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn as_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn try_from_u64(value: u64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_tick!(u8, u16, u32, u64, usize);

/// Trait for abstracting tick sources.
///
/// Reads must return a value that was valid at some point no earlier than
/// the start of the current scheduling step. Implementations reading a
/// counter wider than the platform's atomic access must guard the read
/// themselves, otherwise a torn value may be observed around wraparound.
pub trait TickSource<T: Tick> {
    /// Returns the current tick count.
    fn now(&self) -> T;
}

impl<T: Tick, S: TickSource<T> + ?Sized> TickSource<T> for &S {
    #[inline]
    fn now(&self) -> T {
        (**self).now()
    }
}
