//! gsr-clock
//!
//! Per-side countdown clocks with server resynchronization and local
//! interpolation between updates.
//!
//! The clock engine never schedules anything itself. A [`TickScheduler`] is
//! injected to turn periodic callbacks on and off, and a [`WallClock`] supplies
//! "now" for sync timestamps. The periodic callbacks come back in as
//! `tick(now, side_to_move)` calls through the same event sequence as
//! everything else.

mod engine;
mod scheduler;

pub use engine::{ClockEngine, ClockReading, ClockState, DEFAULT_TICK_INTERVAL_MS};
pub use scheduler::{
    ManualScheduler, ManualWallClock, SchedulerLog, SystemWallClock, TickScheduler, WallClock,
};
