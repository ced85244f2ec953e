//! Shared test infrastructure for pt-timer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use pt_timer::{Tick, TickSource};

// ============================================================================
// Mock Tick Source
// ============================================================================

/// Mock tick source with controllable time advancement
pub struct MockTickSource<T: Tick> {
    current: Cell<T>,
}

impl<T: Tick> MockTickSource<T> {
    pub fn new() -> Self {
        Self::at(T::ZERO)
    }

    pub fn at(tick: T) -> Self {
        Self {
            current: Cell::new(tick),
        }
    }

    /// Advance time by the given number of ticks, wrapping at the counter width
    pub fn advance(&self, ticks: T) {
        self.current.set(self.current.get().wrapping_add(ticks));
    }

    pub fn set(&self, tick: T) {
        self.current.set(tick);
    }
}

impl<T: Tick> TickSource<T> for MockTickSource<T> {
    fn now(&self) -> T {
        self.current.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Runs `step` once per tick until it reports completion.
///
/// The tick source advances by `ticks_per_step` before every step after the
/// first. Returns the number of steps taken, or `None` after `max_steps`.
pub fn steps_until<T: Tick>(
    source: &MockTickSource<T>,
    ticks_per_step: T,
    max_steps: usize,
    mut step: impl FnMut() -> bool,
) -> Option<usize> {
    for n in 0..max_steps {
        if n > 0 {
            source.advance(ticks_per_step);
        }
        if step() {
            return Some(n);
        }
    }
    None
}
