//! Integration tests for Delay and WaitOrTimeout driven by the scheduler

mod common;
use common::*;

use core::cell::Cell;
use pt_timer::{
    Delay, Protothread, PtState, Scheduler, WaitOrTimeout, WaitOutcome, WaitState, pt_wait,
};

// ============================================================================
// Test Threads
// ============================================================================

/// Sleeps once, then records the step it woke on
struct Sleeper<'a> {
    source: &'a MockTickSource<u8>,
    delay: Delay<u8>,
    steps: usize,
    woke_at: Option<(usize, u8)>,
}

impl<'a> Sleeper<'a> {
    fn new(source: &'a MockTickSource<u8>, duration: u8) -> Self {
        Self {
            source,
            delay: Delay::new(duration),
            steps: 0,
            woke_at: None,
        }
    }
}

impl Protothread for Sleeper<'_> {
    fn resume(&mut self) -> PtState {
        let step = self.steps;
        self.steps += 1;

        pt_wait!(self.delay.poll(self.source));

        self.woke_at = Some((step, pt_timer::TickSource::now(self.source)));
        PtState::Ended
    }
}

/// Waits for a flag with a timeout, then records which branch fired
struct Listener<'a> {
    source: &'a MockTickSource<u8>,
    flag: &'a Cell<bool>,
    wait: WaitOrTimeout<u8>,
    steps: usize,
    result: Option<(usize, WaitOutcome)>,
}

impl<'a> Listener<'a> {
    fn new(source: &'a MockTickSource<u8>, flag: &'a Cell<bool>, timeout: u8) -> Self {
        Self {
            source,
            flag,
            wait: WaitOrTimeout::new(timeout),
            steps: 0,
            result: None,
        }
    }
}

impl Protothread for Listener<'_> {
    fn resume(&mut self) -> PtState {
        let step = self.steps;
        self.steps += 1;

        let flag = self.flag;
        let outcome = pt_wait!(self.wait.poll(self.source, || flag.get()));

        self.result = Some((step, outcome));
        match outcome {
            WaitOutcome::Condition => PtState::Ended,
            WaitOutcome::TimedOut => PtState::Exited,
        }
    }
}

/// Toggles every `period` ticks forever
struct Blinker<'a> {
    source: &'a MockTickSource<u8>,
    delay: Delay<u8>,
    toggled_at: heapless::Vec<u8, 16>,
}

impl Protothread for Blinker<'_> {
    fn resume(&mut self) -> PtState {
        loop {
            pt_wait!(self.delay.poll(self.source));
            let _ = self
                .toggled_at
                .push(pt_timer::TickSource::now(self.source));
            self.delay.reset();
        }
    }
}

/// Runs one step at the current tick, then advances and steps until idle
fn run<P: Protothread, const N: usize>(
    scheduler: &mut Scheduler<P, N>,
    source: &MockTickSource<u8>,
    ticks_per_step: u8,
    max_steps: usize,
) -> Option<usize> {
    steps_until(source, ticks_per_step, max_steps, || scheduler.step() == 0)
}

// ============================================================================
// Delay
// ============================================================================

#[test]
fn delay_resumes_on_first_expired_step() {
    let source = MockTickSource::<u8>::at(0);
    let mut scheduler = Scheduler::<Sleeper, 1>::new();
    let id = scheduler.spawn(Sleeper::new(&source, 10)).unwrap();

    // 3 ticks per step: expired first at step 4 (tick 12)
    assert_eq!(run(&mut scheduler, &source, 3, 50), Some(4));
    assert_eq!(scheduler.thread(id).unwrap().woke_at, Some((4, 12)));
    assert_eq!(scheduler.state(id), Ok(PtState::Ended));
}

#[test]
fn delay_resumes_on_time_across_wraparound() {
    let source = MockTickSource::<u8>::at(250);
    let mut scheduler = Scheduler::<Sleeper, 1>::new();
    let id = scheduler.spawn(Sleeper::new(&source, 10)).unwrap();

    // One tick per step: pending through tick 3, resumes at tick 4
    assert_eq!(run(&mut scheduler, &source, 1, 50), Some(10));
    assert_eq!(scheduler.thread(id).unwrap().woke_at, Some((10, 4)));
}

#[test]
fn zero_delay_passes_on_first_step() {
    let source = MockTickSource::<u8>::at(77);
    let mut scheduler = Scheduler::<Sleeper, 1>::new();
    let id = scheduler.spawn(Sleeper::new(&source, 0)).unwrap();

    assert_eq!(scheduler.step(), 0);
    assert_eq!(scheduler.thread(id).unwrap().woke_at, Some((0, 77)));
}

#[test]
fn concurrent_delays_wake_independently() {
    let source = MockTickSource::<u8>::at(120);
    let mut scheduler = Scheduler::<Sleeper, 2>::new();
    let short = scheduler.spawn(Sleeper::new(&source, 5)).unwrap();
    let long = scheduler.spawn(Sleeper::new(&source, 9)).unwrap();

    assert_eq!(run(&mut scheduler, &source, 1, 50), Some(9));
    assert_eq!(scheduler.thread(short).unwrap().woke_at, Some((5, 125)));
    assert_eq!(scheduler.thread(long).unwrap().woke_at, Some((9, 129)));
}

#[test]
fn periodic_delay_does_not_drift() {
    let source = MockTickSource::<u8>::at(0);
    let mut scheduler = Scheduler::<Blinker, 1>::new();
    let id = scheduler
        .spawn(Blinker {
            source: &source,
            delay: Delay::new(10),
            toggled_at: heapless::Vec::new(),
        })
        .unwrap();

    scheduler.step();
    for _ in 0..100 {
        source.advance(1);
        assert_eq!(scheduler.step(), 1);
    }

    let blinker = scheduler.thread(id).unwrap();
    assert_eq!(
        blinker.toggled_at.as_slice(),
        &[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
    );
    assert_eq!(blinker.delay.state(), WaitState::Waiting);
    assert_eq!(blinker.delay.timer().baseline(), 100);
}

// ============================================================================
// WaitOrTimeout
// ============================================================================

#[test]
fn wait_ends_on_condition_before_timeout() {
    let source = MockTickSource::<u8>::at(0);
    let flag = Cell::new(false);
    let mut scheduler = Scheduler::<Listener, 1>::new();
    let id = scheduler.spawn(Listener::new(&source, &flag, 20)).unwrap();

    for _ in 0..5 {
        assert_eq!(scheduler.step(), 1);
        source.advance(1);
    }
    flag.set(true);

    assert_eq!(scheduler.step(), 0);
    let listener = scheduler.thread(id).unwrap();
    assert_eq!(listener.result, Some((5, WaitOutcome::Condition)));
    assert_eq!(listener.wait.outcome(), Some(WaitOutcome::Condition));
    assert_eq!(scheduler.state(id), Ok(PtState::Ended));
}

#[test]
fn wait_ends_exactly_at_timeout_without_condition() {
    let source = MockTickSource::<u8>::at(240);
    let flag = Cell::new(false);
    let mut scheduler = Scheduler::<Listener, 1>::new();
    let id = scheduler.spawn(Listener::new(&source, &flag, 20)).unwrap();

    assert_eq!(run(&mut scheduler, &source, 1, 100), Some(20));
    let listener = scheduler.thread(id).unwrap();
    assert_eq!(listener.result, Some((20, WaitOutcome::TimedOut)));
    assert_eq!(listener.wait.remaining(&source), Some(0));
    assert_eq!(scheduler.state(id), Ok(PtState::Exited));
}

#[test]
fn wait_with_condition_already_true_passes_immediately() {
    let source = MockTickSource::<u8>::new();
    let flag = Cell::new(true);
    let mut scheduler = Scheduler::<Listener, 1>::new();
    let id = scheduler.spawn(Listener::new(&source, &flag, 50)).unwrap();

    assert_eq!(scheduler.step(), 0);
    assert_eq!(
        scheduler.thread(id).unwrap().result,
        Some((0, WaitOutcome::Condition))
    );
}
