//! gsr-testkit
//!
//! Fixtures shared by the end-to-end scenarios under `tests/`:
//! - [`Harness`]: an engine behind a [`Dispatcher`], driven by a manual
//!   scheduler and wall clock, recording every notification;
//! - [`RecordingSink`] with small queries over what was emitted;
//! - coordinate-move helpers for writing lines of play as `"e2e4"` strings.

use anyhow::{Context, Result};
use gsr_clock::{ClockEngine, ManualScheduler, ManualWallClock};
use gsr_config::EngineConfig;
use gsr_engine::{
    Dispatcher, EngineError, Event, GameDescriptor, Notification, NotificationSink,
    ReconciliationEngine,
};
use gsr_position::{parse_coordinate_move, Move, Position, Square};

// ---------------------------------------------------------------------------
// Move helpers
// ---------------------------------------------------------------------------

/// Parse a line of coordinate moves played one after another from `initial`.
pub fn line(initial: &Position, coords: &[&str]) -> Result<Vec<Move>> {
    let mut pos = initial.clone();
    let mut out = Vec::with_capacity(coords.len());
    for c in coords {
        let mv = parse_coordinate_move(&pos, c).with_context(|| format!("parse move {c}"))?;
        pos = pos
            .apply_move(&mv)
            .with_context(|| format!("apply move {c} to {pos}"))?;
        out.push(mv);
    }
    Ok(out)
}

pub fn square(s: &str) -> Result<Square> {
    Square::parse(s).with_context(|| format!("parse square {s}"))
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub seen: Vec<Notification>,
}

impl NotificationSink for RecordingSink {
    fn deliver(&mut self, notification: Notification) {
        self.seen.push(notification);
    }
}

impl RecordingSink {
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn submitted(&self) -> Vec<Move> {
        self.seen
            .iter()
            .filter_map(|n| match n {
                Notification::SubmitMoveToServer { mv } => Some(*mv),
                _ => None,
            })
            .collect()
    }

    pub fn last_display(&self) -> Option<(&Position, Option<&Move>)> {
        self.seen.iter().rev().find_map(|n| match n {
            Notification::DisplayPositionChanged {
                position,
                highlighted,
            } => Some((position, highlighted.as_ref())),
            _ => None,
        })
    }

    pub fn last_move_list(&self) -> Option<&[Move]> {
        self.seen.iter().rev().find_map(|n| match n {
            Notification::MoveListChanged { moves } => Some(moves.as_slice()),
            _ => None,
        })
    }

    /// Final shading state per square, in first-touched order.
    pub fn shading(&self) -> Vec<(Square, bool)> {
        let mut out: Vec<(Square, bool)> = Vec::new();
        for n in &self.seen {
            if let Notification::SquarePendingChanged { square, pending } = n {
                match out.iter_mut().find(|(s, _)| s == square) {
                    Some(entry) => entry.1 = *pending,
                    None => out.push((*square, *pending)),
                }
            }
        }
        out
    }

    pub fn shaded_squares(&self) -> Vec<Square> {
        self.shading()
            .into_iter()
            .filter(|(_, pending)| *pending)
            .map(|(s, _)| s)
            .collect()
    }

    pub fn effects(&self) -> Vec<(Move, bool)> {
        self.seen
            .iter()
            .filter_map(|n| match n {
                Notification::MoveCompletedEffect { mv, own, .. } => Some((*mv, *own)),
                _ => None,
            })
            .collect()
    }

    pub fn resync_requested(&self) -> bool {
        self.seen
            .iter()
            .any(|n| matches!(n, Notification::ResyncRequested { .. }))
    }

    pub fn to_json_lines(&self) -> Result<String> {
        let mut s = String::new();
        for n in &self.seen {
            s.push_str(&serde_json::to_string(n).context("serialize notification")?);
            s.push('\n');
        }
        Ok(s)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub sink: RecordingSink,
    pub scheduler: ManualScheduler,
    pub wall: ManualWallClock,
}

impl Harness {
    pub fn new(descriptor: GameDescriptor) -> Self {
        Self::with_config(descriptor, EngineConfig::default())
    }

    pub fn with_config(descriptor: GameDescriptor, config: EngineConfig) -> Self {
        let scheduler = ManualScheduler::new();
        let wall = ManualWallClock::at(0);
        let clock = ClockEngine::new(Box::new(scheduler.clone()), Box::new(wall.clone()));
        let engine = ReconciliationEngine::new(descriptor, config, clock);
        Self {
            dispatcher: Dispatcher::new(engine),
            sink: RecordingSink::default(),
            scheduler,
            wall,
        }
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        self.dispatcher.engine()
    }

    pub fn send(&mut self, event: Event) -> Result<(), EngineError> {
        self.dispatcher.dispatch(event, &mut self.sink)
    }

    /// Parse `coords` against the position the user currently sees at the
    /// tail (authoritative plus anything pending).
    pub fn live_move(&self, coords: &str) -> Result<Move> {
        let (pos, _) = self.engine().displayed();
        parse_coordinate_move(&pos, coords).with_context(|| format!("parse move {coords}"))
    }

    /// Parse `coords` against the authoritative tail.
    pub fn server_move(&self, coords: &str) -> Result<Move> {
        parse_coordinate_move(self.engine().timeline().position(), coords)
            .with_context(|| format!("parse move {coords}"))
    }

    pub fn submit(&mut self, coords: &str) -> Result<Move> {
        let mv = self.live_move(coords)?;
        self.send(Event::LocalMoveSubmitted { mv })?;
        Ok(mv)
    }

    pub fn confirm(&mut self, coords: &str) -> Result<Move> {
        let mv = self.server_move(coords)?;
        self.send(Event::MoveConfirmed { mv })?;
        Ok(mv)
    }

    /// Confirm a whole line as if the server streamed it.
    pub fn play(&mut self, coords: &[&str]) -> Result<Vec<Move>> {
        coords.iter().map(|c| self.confirm(c)).collect()
    }

    /// Advance the manual wall clock and deliver a tick at the new time.
    pub fn tick_after(&mut self, ms: u64) -> Result<(), EngineError> {
        self.wall.advance(ms);
        let now_ms = gsr_clock::WallClock::now_ms(&self.wall);
        self.send(Event::TimerTick { now_ms })
    }
}
