#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Tick`**: Unsigned counter width (`u8`..`u64`, `usize`) with modular arithmetic
//! - **`TickSource`**: Trait to implement for your timing system
//! - **`TickCounter`**: Wrapping counter advanced by the host's tick interrupt
//! - **`PtTimer`**: Baseline tick captured when a wait starts
//! - **`expired`**: Wraparound-safe "has this duration passed" predicate
//! - **`Delay`**: Suspends a protothread for a fixed number of ticks
//! - **`WaitOrTimeout`**: Suspends until a condition holds or a timeout elapses
//! - **`Protothread`**: Trait for stackless routines resumed once per scheduling step
//! - **`Scheduler`**: Fixed-capacity round-robin driver for protothreads
//! - **`TickRate`**: Converts wall-clock durations into ticks
//!
//! Elapsed time is computed modulo `2^W`, so waits stay correct across counter
//! wraparound as long as durations stay below half the counter range.

pub mod time;
pub mod counter;
pub mod config;
pub mod types;
pub mod timer;
pub mod pt;
pub mod wait;
pub mod scheduler;

pub use time::{Tick, TickSource};
pub use counter::{DefaultTick, SystemTick, TICKS, TickCounter, now, tick};
pub use config::{TickRate, check_duration};
pub use types::{TimeoutError, WaitOutcome, WaitState};
pub use timer::{PtTimer, expired};
pub use pt::{Protothread, PtState, WaitStatus, wait_until};
pub use wait::{Delay, WaitOrTimeout};
pub use scheduler::{Scheduler, SchedulerError, ThreadId};
