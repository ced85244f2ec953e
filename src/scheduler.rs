//! Fixed-capacity round-robin driver for protothreads.

use crate::pt::{Protothread, PtState};
use heapless::Vec;

/// Identifies a protothread within a [`Scheduler`].
///
/// Assigned in spawn order, starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThreadId(pub usize);

impl From<usize> for ThreadId {
    fn from(id: usize) -> Self {
        ThreadId(id)
    }
}

impl From<ThreadId> for usize {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

/// Errors that can occur during scheduler operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// The scheduler is full and cannot accept more threads.
    SchedulerFull,

    /// The specified thread ID does not exist in the scheduler.
    InvalidThreadId(ThreadId),
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::SchedulerFull => {
                write!(f, "scheduler is full, cannot spawn more threads")
            }
            SchedulerError::InvalidThreadId(id) => {
                write!(f, "thread ID {} does not exist in scheduler", id.0)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

struct Slot<P> {
    thread: P,
    state: PtState,
}

/// Re-invokes a set of protothreads once per scheduling step.
///
/// Threads are resumed in spawn order. A thread that returns
/// [`PtState::Exited`] or [`PtState::Ended`] keeps its slot but is never
/// resumed again. The scheduler does nothing between steps; the host
/// decides when to call [`step`](Self::step), typically after each tick.
///
/// # Type Parameters
/// * `P` - Protothread type (an enum covers heterogeneous threads)
/// * `N` - Maximum number of threads
pub struct Scheduler<P: Protothread, const N: usize> {
    slots: Vec<Slot<P>, N>,
}

impl<P: Protothread, const N: usize> Scheduler<P, N> {
    /// Creates an empty scheduler.
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Adds a thread. It is first resumed on the next step.
    ///
    /// # Errors
    /// * `SchedulerFull` - All `N` slots are taken
    pub fn spawn(&mut self, thread: P) -> Result<ThreadId, SchedulerError> {
        let id = ThreadId(self.slots.len());
        self.slots
            .push(Slot {
                thread,
                state: PtState::Waiting,
            })
            .map_err(|_| SchedulerError::SchedulerFull)?;
        Ok(id)
    }

    /// Resumes every running thread once.
    ///
    /// Returns the number of threads still running afterwards.
    pub fn step(&mut self) -> usize {
        let mut running = 0;

        for (_idx, slot) in self.slots.iter_mut().enumerate() {
            if !slot.state.is_running() {
                continue;
            }

            slot.state = slot.thread.resume();

            if slot.state.is_running() {
                running += 1;
            } else {
                #[cfg(feature = "defmt")]
                defmt::trace!("thread {} finished: {}", _idx, slot.state);
            }
        }

        running
    }

    /// Last state reported by a thread.
    ///
    /// # Errors
    /// * `InvalidThreadId` - No thread with this ID
    pub fn state(&self, id: ThreadId) -> Result<PtState, SchedulerError> {
        self.slots
            .get(id.0)
            .map(|slot| slot.state)
            .ok_or(SchedulerError::InvalidThreadId(id))
    }

    /// Returns a reference to a thread.
    ///
    /// # Errors
    /// * `InvalidThreadId` - No thread with this ID
    pub fn thread(&self, id: ThreadId) -> Result<&P, SchedulerError> {
        self.slots
            .get(id.0)
            .map(|slot| &slot.thread)
            .ok_or(SchedulerError::InvalidThreadId(id))
    }

    /// Returns a mutable reference to a thread.
    ///
    /// # Errors
    /// * `InvalidThreadId` - No thread with this ID
    pub fn thread_mut(&mut self, id: ThreadId) -> Result<&mut P, SchedulerError> {
        self.slots
            .get_mut(id.0)
            .map(|slot| &mut slot.thread)
            .ok_or(SchedulerError::InvalidThreadId(id))
    }

    /// Number of spawned threads, finished ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no thread was spawned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if every spawned thread has finished.
    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(|slot| !slot.state.is_running())
    }

    /// Maximum number of threads.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<P: Protothread, const N: usize> Default for Scheduler<P, N> {
    fn default() -> Self {
        Self::new()
    }
}
