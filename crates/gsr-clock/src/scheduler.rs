use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Capability to start and stop periodic tick callbacks.
///
/// Implementations deliver ticks back to the event loop; they must not call
/// into the clock engine directly.
pub trait TickScheduler {
    /// Start (or restart) ticking: first tick after `initial_delay_ms`, then
    /// every `interval_ms`.
    fn start(&mut self, initial_delay_ms: u64, interval_ms: u64);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Source of wall-clock milliseconds.
pub trait WallClock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by the system time (UTC epoch milliseconds).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now_ms(&self) -> u64 {
        let ms = chrono::Utc::now().timestamp_millis();
        u64::try_from(ms).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Manual implementations (tests, deterministic replay)
// ---------------------------------------------------------------------------

/// What a [`ManualScheduler`] has been asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerLog {
    pub running: bool,
    pub initial_delay_ms: u64,
    pub interval_ms: u64,
    pub starts: usize,
    pub stops: usize,
}

/// Scheduler that only records calls. Clones share the same log, so a test can
/// keep a handle after moving one into the clock engine.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    log: Rc<RefCell<SchedulerLog>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> SchedulerLog {
        self.log.borrow().clone()
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, initial_delay_ms: u64, interval_ms: u64) {
        let mut log = self.log.borrow_mut();
        log.running = true;
        log.initial_delay_ms = initial_delay_ms;
        log.interval_ms = interval_ms;
        log.starts += 1;
    }

    fn stop(&mut self) {
        let mut log = self.log.borrow_mut();
        if log.running {
            log.stops += 1;
        }
        log.running = false;
    }

    fn is_running(&self) -> bool {
        self.log.borrow().running
    }
}

/// Settable wall clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualWallClock {
    now: Rc<Cell<u64>>,
}

impl ManualWallClock {
    pub fn at(ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl WallClock for ManualWallClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_clones_share_log() {
        let handle = ManualScheduler::new();
        let mut boxed: Box<dyn TickScheduler> = Box::new(handle.clone());
        boxed.start(40, 100);
        assert!(handle.log().running);
        assert_eq!(handle.log().initial_delay_ms, 40);
        boxed.stop();
        boxed.stop();
        assert_eq!(handle.log().stops, 1, "stopping a stopped scheduler is not counted");
    }

    #[test]
    fn manual_wall_clock_advances() {
        let c = ManualWallClock::at(1_000);
        let shared = c.clone();
        c.advance(250);
        assert_eq!(shared.now_ms(), 1_250);
    }
}
