#![no_std]
#![no_main]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;
use pt_timer::{
    Delay, Protothread, PtState, Scheduler, TickRate, WaitOrTimeout, WaitOutcome, pt_wait,
};

/// Core clock assumed for the SysTick reload value
const CORE_CLOCK_HZ: u32 = 8_000_000;

// ============================================================================
// Tick Source
// ============================================================================

#[exception]
fn SysTick() {
    pt_timer::tick();
}

// ============================================================================
// Minimal Threads
// ============================================================================

/// Toggles a flag every period
pub struct Heartbeat {
    delay: Delay<u32>,
    beats: u32,
}

impl Protothread for Heartbeat {
    fn resume(&mut self) -> PtState {
        loop {
            pt_wait!(self.delay.poll(&pt_timer::SystemTick));
            self.beats = self.beats.wrapping_add(1);
            self.delay.reset();
        }
    }
}

/// Waits for a (never arriving) event with a timeout
pub struct Watchdog {
    wait: WaitOrTimeout<u32>,
}

impl Protothread for Watchdog {
    fn resume(&mut self) -> PtState {
        let outcome = pt_wait!(
            self.wait
                .poll(&pt_timer::SystemTick, || core::hint::black_box(false))
        );
        match outcome {
            WaitOutcome::Condition => PtState::Ended,
            WaitOutcome::TimedOut => PtState::Exited,
        }
    }
}

pub enum Thread {
    Heartbeat(Heartbeat),
    Watchdog(Watchdog),
}

impl Protothread for Thread {
    fn resume(&mut self) -> PtState {
        match self {
            Thread::Heartbeat(thread) => thread.resume(),
            Thread::Watchdog(thread) => thread.resume(),
        }
    }
}

#[entry]
fn main() -> ! {
    let rate = TickRate::DEFAULT;

    if let Some(mut core) = cortex_m::Peripherals::take() {
        core.SYST.set_clock_source(SystClkSource::Core);
        core.SYST.set_reload(CORE_CLOCK_HZ / rate.hz() - 1);
        core.SYST.clear_current();
        core.SYST.enable_counter();
        core.SYST.enable_interrupt();
    }

    let mut scheduler = Scheduler::<Thread, 2>::new();

    if let Ok(period) = rate.ticks_from_millis::<u32>(500) {
        let _ = scheduler.spawn(Thread::Heartbeat(Heartbeat {
            delay: Delay::new(period),
            beats: 0,
        }));
    }
    if let Ok(timeout) = rate.ticks_from_millis::<u32>(2_000) {
        let _ = scheduler.spawn(Thread::Watchdog(Watchdog {
            wait: WaitOrTimeout::new(timeout),
        }));
    }

    loop {
        scheduler.step();
        cortex_m::asm::wfi();
    }
}
