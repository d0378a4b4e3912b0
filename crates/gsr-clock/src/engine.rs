use gsr_position::Player;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{TickScheduler, WallClock};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// One side's clock as last synchronized or interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockState {
    /// May go negative when a flag falls before the server says so.
    pub remaining_ms: i64,
    pub is_running: bool,
    pub last_sync_ms: u64,
}

/// What the clock display should show for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub side: Player,
    pub remaining_ms: i64,
    pub running: bool,
}

pub struct ClockEngine {
    white: ClockState,
    black: ClockState,
    interval_ms: u64,
    ended: bool,
    paused_for_submission: bool,
    scheduler: Box<dyn TickScheduler>,
    wall: Box<dyn WallClock>,
}

impl std::fmt::Debug for ClockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockEngine")
            .field("white", &self.white)
            .field("black", &self.black)
            .field("interval_ms", &self.interval_ms)
            .field("ended", &self.ended)
            .field("paused_for_submission", &self.paused_for_submission)
            .field("ticking", &self.scheduler.is_running())
            .finish()
    }
}

impl ClockEngine {
    pub fn new(scheduler: Box<dyn TickScheduler>, wall: Box<dyn WallClock>) -> Self {
        Self {
            white: ClockState::default(),
            black: ClockState::default(),
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
            ended: false,
            paused_for_submission: false,
            scheduler,
            wall,
        }
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms.max(1);
        self
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn state(&self, side: Player) -> &ClockState {
        match side {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    fn state_mut(&mut self, side: Player) -> &mut ClockState {
        match side {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }

    pub fn reading(&self, side: Player) -> ClockReading {
        let s = self.state(side);
        ClockReading {
            side,
            remaining_ms: s.remaining_ms,
            running: s.is_running,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Phase offset so ticks land on whole-interval boundaries of the
    /// server's remaining time.
    fn phase_delay(&self, remaining_ms: i64) -> u64 {
        let interval = i64::try_from(self.interval_ms).unwrap_or(i64::MAX);
        remaining_ms.rem_euclid(interval) as u64
    }

    /// Authoritative resync for one side.
    pub fn adjust(
        &mut self,
        side: Player,
        remaining_ms: i64,
        running: bool,
        side_to_move: Player,
    ) -> ClockReading {
        let now = self.wall.now_ms();
        // An ended clock never reports a running side.
        let running = running && !self.ended;
        {
            let s = self.state_mut(side);
            s.remaining_ms = remaining_ms;
            s.is_running = running;
            s.last_sync_ms = now;
        }

        if running {
            let delay = self.phase_delay(remaining_ms);
            self.paused_for_submission = false;
            self.scheduler.start(delay, self.interval_ms);
            debug!(side = %side, remaining_ms, delay_ms = delay, "clock ticking");
        } else if !running && side == side_to_move && self.scheduler.is_running() {
            self.scheduler.stop();
            debug!(side = %side, remaining_ms, "clock stopped by server");
        }
        self.reading(side)
    }

    /// Interpolate the side to move. `None` for stale ticks.
    pub fn tick(&mut self, now_ms: u64, side_to_move: Player) -> Option<ClockReading> {
        if self.ended || !self.scheduler.is_running() {
            return None;
        }
        let s = self.state_mut(side_to_move);
        if !s.is_running {
            return None;
        }
        let elapsed = now_ms.saturating_sub(s.last_sync_ms);
        s.remaining_ms -= i64::try_from(elapsed).unwrap_or(i64::MAX);
        s.last_sync_ms = now_ms.max(s.last_sync_ms);
        Some(self.reading(side_to_move))
    }

    /// Stop ticking while our move is on its way to the server.
    pub fn pause_for_submission(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.stop();
            self.paused_for_submission = true;
        }
    }

    /// Undo [`pause_for_submission`](Self::pause_for_submission). Time spent
    /// paused is charged on the next tick since `last_sync_ms` is untouched.
    pub fn resume_after_rejection(&mut self, side_to_move: Player) {
        if !self.paused_for_submission || self.ended {
            return;
        }
        self.paused_for_submission = false;
        let remaining = self.state(side_to_move).remaining_ms;
        let delay = self.phase_delay(remaining);
        self.scheduler.start(delay, self.interval_ms);
        debug!(side = %side_to_move, remaining_ms = remaining, "clock resumed after rejection");
    }

    pub fn is_paused_for_submission(&self) -> bool {
        self.paused_for_submission
    }

    /// Stop until the next [`adjust`](Self::adjust).
    pub fn hold(&mut self) {
        self.paused_for_submission = false;
        self.scheduler.stop();
    }

    pub fn end(&mut self) {
        self.ended = true;
        self.paused_for_submission = false;
        self.scheduler.stop();
    }

    /// New game: clear the ended flag and wait for an adjustment.
    pub fn restart(&mut self) {
        self.ended = false;
        self.hold();
        self.white.is_running = false;
        self.black.is_running = false;
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        let interval_ms = interval_ms.max(1);
        if interval_ms == self.interval_ms {
            return;
        }
        self.interval_ms = interval_ms;
        if self.scheduler.is_running() {
            self.scheduler.start(interval_ms, interval_ms);
        }
    }
}
