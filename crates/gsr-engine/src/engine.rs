//! ReconciliationEngine
//!
//! Owns the timeline, the pending-move state, the display cursor and the
//! clock. [`ReconciliationEngine::handle`] is the only mutation entry point;
//! it runs one event to completion and returns the notifications for it.
//!
//! Three positions are in play:
//! - authoritative: `timeline.position()`, only ever moved by the server;
//! - live: authoritative plus the in-flight move plus the queued premove;
//! - displayed: live when the cursor is at the tail, otherwise a replayed
//!   prefix of the timeline.

use gsr_clock::ClockEngine;
use gsr_config::EngineConfig;
use gsr_position::{Move, Player, Position};
use gsr_timeline::{GameTimeline, HistoryNavigator};
use tracing::{debug, info, warn};

use crate::pending::{PendingEvent, PendingOutcome, PendingState};
use crate::{EffectKind, EngineError, Event, GameDescriptor, GameKind, MoveInputMode, Notification};

#[derive(Debug)]
pub struct ReconciliationEngine {
    descriptor: GameDescriptor,
    config: EngineConfig,
    timeline: GameTimeline,
    pending: PendingState,
    cursor: usize,
    active: bool,
    clock: ClockEngine,
}

impl ReconciliationEngine {
    pub fn new(descriptor: GameDescriptor, config: EngineConfig, mut clock: ClockEngine) -> Self {
        clock.set_interval(config.tick_interval_ms);
        let timeline = GameTimeline::new(descriptor.initial_position.clone());
        Self {
            descriptor,
            config,
            timeline,
            pending: PendingState::Settled,
            cursor: 0,
            active: true,
            clock,
        }
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    pub fn descriptor(&self) -> &GameDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn timeline(&self) -> &GameTimeline {
        &self.timeline
    }

    pub fn pending(&self) -> &PendingState {
        &self.pending
    }

    pub fn in_flight(&self) -> Option<&Move> {
        self.pending.in_flight()
    }

    pub fn queued(&self) -> Option<&Move> {
        self.pending.queued()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clock(&self) -> &ClockEngine {
        &self.clock
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_live(&self) -> bool {
        self.cursor == self.timeline.len()
    }

    /// Whether the board should accept a drag right now.
    pub fn is_editable(&self) -> bool {
        self.active && self.is_live() && self.pending.queued().is_none()
    }

    /// Whether a move entered now would be sent rather than queued (ignoring
    /// any in-flight move).
    pub fn is_user_turn(&self) -> bool {
        match self.descriptor.kind {
            GameKind::Observed | GameKind::Isolated => false,
            GameKind::ExaminedByUser => true,
            GameKind::PlayedByUser => self.descriptor.user_side == Some(self.timeline.side_to_move()),
        }
    }

    pub fn move_input_mode(&self) -> MoveInputMode {
        match (self.descriptor.kind, self.descriptor.user_side) {
            (GameKind::PlayedByUser, Some(side)) => MoveInputMode::Side(side),
            (GameKind::ExaminedByUser, _) => MoveInputMode::SideToMove,
            _ => MoveInputMode::None,
        }
    }

    /// What the board shows for the current cursor.
    pub fn displayed(&self) -> (Position, Option<Move>) {
        if self.is_live() {
            return self.live_view();
        }
        match HistoryNavigator::snapshot(&self.timeline, self.cursor) {
            Ok(s) => (s.position, self.filter_highlight(s.highlighted)),
            Err(e) => {
                // The cursor is kept within 0..=len by every transition.
                warn!(error = %e, "display cursor out of range; showing live position");
                self.live_view()
            }
        }
    }

    /// Authoritative position plus the in-flight move.
    fn tentative_base(&self) -> Position {
        let mut pos = self.timeline.position().clone();
        if let Some(in_flight) = self.pending.in_flight() {
            match pos.apply_move(in_flight) {
                Ok(next) => pos = next,
                Err(e) => warn!(error = %e, "in-flight move no longer applies"),
            }
        }
        pos
    }

    fn live_view(&self) -> (Position, Option<Move>) {
        let mut pos = self.tentative_base();
        if let Some(queued) = self.pending.queued() {
            match pos.apply_move(queued) {
                Ok(next) => pos = next,
                Err(e) => debug!(error = %e, "queued move not shown; it no longer applies"),
            }
        }
        let highlighted = self.filter_highlight(self.timeline.last_move().copied());
        (pos, highlighted)
    }

    fn is_own_move(&self, mv: &Move) -> bool {
        match self.descriptor.kind {
            GameKind::PlayedByUser => self.descriptor.user_side == Some(mv.mover),
            GameKind::ExaminedByUser => true,
            GameKind::Observed | GameKind::Isolated => false,
        }
    }

    fn filter_highlight(&self, mv: Option<Move>) -> Option<Move> {
        mv.filter(|m| self.config.highlight_own_moves || !self.is_own_move(m))
    }

    // -----------------------------------------------------------------------
    // Write side
    // -----------------------------------------------------------------------

    /// Run one event to completion.
    ///
    /// # Errors
    /// Only local input can fail, and a failure leaves the engine untouched.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Notification>, EngineError> {
        debug!(
            event = event.name(),
            state = self.pending.name(),
            cursor = self.cursor,
            len = self.timeline.len(),
            "handle"
        );
        let mut out = Vec::new();
        match event {
            Event::GameReset {
                position,
                descriptor,
            } => self.on_reset(position, descriptor, &mut out),
            Event::MoveConfirmed { mv } => self.on_confirmed(mv, &mut out),
            Event::MoveRejected => self.on_rejected(&mut out),
            Event::TakebackOccurred { plies } => self.on_takeback(plies, &mut out),
            Event::ClockAdjusted {
                side,
                remaining_ms,
                running,
            } => self.on_clock_adjusted(side, remaining_ms, running, &mut out),
            Event::GameEnded => self.on_game_ended(),
            Event::LocalMoveSubmitted { mv } => self.on_local_move(mv, &mut out)?,
            Event::LocalHistoryNavigated { index } => self.on_navigate(index, &mut out)?,
            Event::LocalMoveCancelled => self.on_cancel(&mut out),
            Event::TimerTick { now_ms } => self.on_tick(now_ms, &mut out),
            Event::ConfigurationChanged { config } => self.on_config(config, &mut out),
        }
        Ok(out)
    }

    fn on_reset(&mut self, position: Position, descriptor: GameDescriptor, out: &mut Vec<Notification>) {
        let t = self.pending.apply(PendingEvent::Clear);
        push_shading(&t, out);
        self.timeline = GameTimeline::new(position);
        self.descriptor = descriptor;
        self.cursor = 0;
        self.active = true;
        self.clock.restart();
        info!(
            kind = ?self.descriptor.kind,
            user_side = ?self.descriptor.user_side,
            position = %self.timeline.initial(),
            "game reset"
        );
        self.push_display(out);
        self.push_move_list(out);
    }

    fn on_confirmed(&mut self, mv: Move, out: &mut Vec<Notification>) {
        let was_live = self.is_live();
        if let Err(e) = self.timeline.append(mv) {
            self.force_resync(format!("confirmed move {mv} does not fit the timeline: {e}"), out);
            return;
        }

        let t = self.pending.apply(PendingEvent::Confirmed {
            mv,
            side_to_move: self.timeline.side_to_move(),
            // An ended game never sends anything, premoves included.
            promote: self.active,
        });
        if let Some(superseded) = t.superseded {
            warn!(%superseded, confirmed = %mv, "in-flight move superseded by a different confirmation");
        }
        if !t.echo {
            out.push(Notification::MoveCompletedEffect {
                mv,
                own: false,
                effect: EffectKind::of(&mv),
            });
        }

        // Stopped until the server's next adjustment for the new side to move.
        self.clock.hold();

        if was_live {
            self.cursor = self.timeline.len();
        }
        push_shading(&t, out);
        if let Some(promoted) = t.submit {
            debug!(mv = %promoted, "premove promoted");
            out.push(Notification::SubmitMoveToServer { mv: promoted });
            self.clock.pause_for_submission();
        }
        if was_live {
            self.push_display(out);
        }
        self.push_move_list(out);
    }

    fn on_rejected(&mut self, out: &mut Vec<Notification>) {
        let t = self.pending.apply(PendingEvent::Rejected);
        if !t.rejected {
            debug!("rejection with nothing in flight ignored");
            return;
        }
        info!(len = self.timeline.len(), "in-flight move rejected; reverting");
        push_shading(&t, out);
        self.cursor = self.timeline.len();
        self.clock.resume_after_rejection(self.timeline.side_to_move());
        self.push_display(out);
        self.push_move_list(out);
    }

    fn on_takeback(&mut self, plies: usize, out: &mut Vec<Notification>) {
        let len = self.timeline.len();
        let Some(new_len) = len.checked_sub(plies) else {
            self.force_resync(format!("takeback of {plies} plies with only {len} played"), out);
            return;
        };
        if let Err(e) = self.timeline.truncate(new_len) {
            self.force_resync(format!("takeback to {new_len} failed: {e}"), out);
            return;
        }
        let t = self.pending.apply(PendingEvent::Clear);
        push_shading(&t, out);
        debug!(plies, new_len, cursor = self.cursor, "takeback");
        if self.cursor >= new_len {
            self.cursor = new_len;
            self.push_display(out);
        }
        self.push_move_list(out);
    }

    fn on_clock_adjusted(
        &mut self,
        side: Player,
        remaining_ms: i64,
        running: bool,
        out: &mut Vec<Notification>,
    ) {
        let r = self
            .clock
            .adjust(side, remaining_ms, running, self.timeline.side_to_move());
        out.push(Notification::ClockDisplayChanged {
            side: r.side,
            remaining_ms: r.remaining_ms,
            running: r.running,
        });
    }

    fn on_game_ended(&mut self) {
        self.clock.end();
        self.active = false;
        info!(
            len = self.timeline.len(),
            pending = self.pending.name(),
            "game ended"
        );
    }

    fn on_local_move(&mut self, mv: Move, out: &mut Vec<Notification>) -> Result<(), EngineError> {
        if !self.active {
            return Err(EngineError::Inactive);
        }
        if !self.is_live() {
            return Err(EngineError::NotAtTail {
                cursor: self.cursor,
                len: self.timeline.len(),
            });
        }
        let base = self.tentative_base();
        let permitted = match self.move_input_mode() {
            MoveInputMode::Side(side) => mv.mover == side,
            MoveInputMode::SideToMove => mv.mover == base.side_to_move(),
            MoveInputMode::None => false,
        };
        if !permitted {
            return Err(EngineError::MoveNotPermitted {
                mv,
                kind: self.descriptor.kind,
            });
        }
        base.apply_move(&mv)?;

        let users_turn = self.is_user_turn() && self.pending.in_flight().is_none();
        if !users_turn && !self.config.premove {
            return Err(EngineError::PremoveDisabled { mv });
        }

        if self.config.own_move_effects {
            out.push(Notification::MoveCompletedEffect {
                mv,
                own: true,
                effect: EffectKind::of(&mv),
            });
        }
        let t = self.pending.apply(PendingEvent::Local { mv, users_turn });
        push_shading(&t, out);
        if let Some(submitted) = t.submit {
            debug!(mv = %submitted, "submitting");
            out.push(Notification::SubmitMoveToServer { mv: submitted });
            self.clock.pause_for_submission();
        } else {
            debug!(%mv, "premove queued");
        }
        self.push_display(out);
        Ok(())
    }

    fn on_navigate(&mut self, index: usize, out: &mut Vec<Notification>) -> Result<(), EngineError> {
        if !HistoryNavigator::is_valid(&self.timeline, index) {
            return Err(EngineError::InvalidNavigation {
                index,
                len: self.timeline.len(),
            });
        }
        self.cursor = index;
        if let Some(queued) = self.pending.queued() {
            out.push(Notification::SquarePendingChanged {
                square: queued.destination,
                pending: self.is_live(),
            });
        }
        self.push_display(out);
        Ok(())
    }

    fn on_cancel(&mut self, out: &mut Vec<Notification>) {
        let t = self.pending.apply(PendingEvent::Cancel);
        if !t.changed {
            return;
        }
        push_shading(&t, out);
        if self.is_live() {
            self.push_display(out);
        }
    }

    fn on_tick(&mut self, now_ms: u64, out: &mut Vec<Notification>) {
        if let Some(r) = self.clock.tick(now_ms, self.timeline.side_to_move()) {
            out.push(Notification::ClockDisplayChanged {
                side: r.side,
                remaining_ms: r.remaining_ms,
                running: r.running,
            });
        }
    }

    fn on_config(&mut self, config: EngineConfig, out: &mut Vec<Notification>) {
        info!(?config, "configuration changed");
        self.config = config;
        self.clock.set_interval(config.tick_interval_ms);
        self.push_display(out);
    }

    /// The local view no longer matches the server. Throw away everything
    /// since the initial position and ask for a resync.
    fn force_resync(&mut self, reason: String, out: &mut Vec<Notification>) {
        warn!(%reason, len = self.timeline.len(), "protocol inconsistency; resetting locally");
        let t = self.pending.apply(PendingEvent::Clear);
        push_shading(&t, out);
        self.timeline = GameTimeline::new(self.timeline.initial().clone());
        self.cursor = 0;
        self.clock.hold();
        self.push_display(out);
        self.push_move_list(out);
        out.push(Notification::ResyncRequested { reason });
    }

    fn push_display(&self, out: &mut Vec<Notification>) {
        let (position, highlighted) = self.displayed();
        out.push(Notification::DisplayPositionChanged {
            position,
            highlighted,
        });
    }

    fn push_move_list(&self, out: &mut Vec<Notification>) {
        out.push(Notification::MoveListChanged {
            moves: self.timeline.moves().to_vec(),
        });
    }
}

fn push_shading(t: &PendingOutcome, out: &mut Vec<Notification>) {
    if let Some(square) = t.unshade {
        out.push(Notification::SquarePendingChanged {
            square,
            pending: false,
        });
    }
    if let Some(square) = t.shade {
        out.push(Notification::SquarePendingChanged {
            square,
            pending: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsr_clock::{ManualScheduler, ManualWallClock};
    use gsr_position::parse_coordinate_move;

    fn engine(descriptor: GameDescriptor) -> ReconciliationEngine {
        let clock = ClockEngine::new(
            Box::new(ManualScheduler::new()),
            Box::new(ManualWallClock::at(0)),
        );
        ReconciliationEngine::new(descriptor, EngineConfig::default(), clock)
    }

    /// Parse a coordinate move against the live position.
    fn mv(e: &ReconciliationEngine, coords: &str) -> Move {
        parse_coordinate_move(&e.live_view().0, coords).unwrap()
    }

    fn confirm(e: &mut ReconciliationEngine, coords: &str) -> Vec<Notification> {
        let m = parse_coordinate_move(e.timeline().position(), coords).unwrap();
        e.handle(Event::MoveConfirmed { mv: m }).unwrap()
    }

    fn submits(out: &[Notification]) -> Vec<Move> {
        out.iter()
            .filter_map(|n| match n {
                Notification::SubmitMoveToServer { mv } => Some(*mv),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn user_turn_by_game_kind() {
        assert!(engine(GameDescriptor::played(Player::White)).is_user_turn());
        assert!(!engine(GameDescriptor::played(Player::Black)).is_user_turn());
        assert!(engine(GameDescriptor::examined()).is_user_turn());
        assert!(!engine(GameDescriptor::observed()).is_user_turn());
    }

    #[test]
    fn observers_cannot_move() {
        let mut e = engine(GameDescriptor::observed());
        let m = mv(&e, "e2e4");
        assert_eq!(
            e.handle(Event::LocalMoveSubmitted { mv: m }),
            Err(EngineError::MoveNotPermitted {
                mv: m,
                kind: GameKind::Observed
            })
        );
    }

    #[test]
    fn played_game_only_moves_own_pieces() {
        let mut e = engine(GameDescriptor::played(Player::White));
        let black = parse_coordinate_move(
            &Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b").unwrap(),
            "e7e5",
        )
        .unwrap();
        assert!(matches!(
            e.handle(Event::LocalMoveSubmitted { mv: black }),
            Err(EngineError::MoveNotPermitted { .. })
        ));
        assert!(e.pending().is_settled());
    }

    #[test]
    fn move_that_does_not_fit_is_refused() {
        let mut e = engine(GameDescriptor::played(Player::White));
        let m = Move::new(
            Player::White,
            gsr_position::Square::parse("e4").unwrap(),
            gsr_position::Square::parse("e5").unwrap(),
            gsr_position::PieceKind::Pawn,
        );
        assert!(matches!(
            e.handle(Event::LocalMoveSubmitted { mv: m }),
            Err(EngineError::MoveDoesNotApply(_))
        ));
    }

    #[test]
    fn own_move_effect_at_submission_not_on_echo() {
        let mut e = engine(GameDescriptor::played(Player::White));
        let m = mv(&e, "e2e4");
        let out = e.handle(Event::LocalMoveSubmitted { mv: m }).unwrap();
        assert!(out.contains(&Notification::MoveCompletedEffect {
            mv: m,
            own: true,
            effect: EffectKind::Move
        }));
        let out = e.handle(Event::MoveConfirmed { mv: m }).unwrap();
        assert!(!out
            .iter()
            .any(|n| matches!(n, Notification::MoveCompletedEffect { .. })));
        assert!(e.pending().is_settled());
    }

    #[test]
    fn own_move_effects_can_be_switched_off() {
        let mut e = engine(GameDescriptor::played(Player::White));
        e.handle(Event::ConfigurationChanged {
            config: EngineConfig {
                own_move_effects: false,
                ..EngineConfig::default()
            },
        })
        .unwrap();
        let m = mv(&e, "e2e4");
        let out = e.handle(Event::LocalMoveSubmitted { mv: m }).unwrap();
        assert!(!out
            .iter()
            .any(|n| matches!(n, Notification::MoveCompletedEffect { .. })));
    }

    #[test]
    fn premove_disabled_refuses_out_of_turn_moves() {
        let mut e = engine(GameDescriptor::played(Player::Black));
        e.handle(Event::ConfigurationChanged {
            config: EngineConfig {
                premove: false,
                ..EngineConfig::default()
            },
        })
        .unwrap();
        let black = parse_coordinate_move(
            &Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b").unwrap(),
            "e7e5",
        )
        .unwrap();
        assert!(matches!(
            e.handle(Event::LocalMoveSubmitted { mv: black }),
            Err(EngineError::PremoveDisabled { .. })
        ));
        assert!(e.pending().is_settled());
    }

    #[test]
    fn examined_game_queues_behind_in_flight() {
        let mut e = engine(GameDescriptor::examined());
        let e4 = mv(&e, "e2e4");
        e.handle(Event::LocalMoveSubmitted { mv: e4 }).unwrap();
        // Live view now has Black to move; an examiner moves that side next.
        let e5 = mv(&e, "e7e5");
        let out = e.handle(Event::LocalMoveSubmitted { mv: e5 }).unwrap();
        assert!(submits(&out).is_empty());
        assert_eq!(e.queued(), Some(&e5));

        let out = e.handle(Event::MoveConfirmed { mv: e4 }).unwrap();
        assert_eq!(submits(&out), vec![e5]);
        assert_eq!(e.in_flight(), Some(&e5));
    }

    #[test]
    fn highlight_respects_own_move_setting() {
        let mut e = engine(GameDescriptor::played(Player::White));
        let e4 = mv(&e, "e2e4");
        e.handle(Event::LocalMoveSubmitted { mv: e4 }).unwrap();
        e.handle(Event::MoveConfirmed { mv: e4 }).unwrap();
        assert_eq!(e.displayed().1, Some(e4));

        let out = e
            .handle(Event::ConfigurationChanged {
                config: EngineConfig {
                    highlight_own_moves: false,
                    ..EngineConfig::default()
                },
            })
            .unwrap();
        assert!(matches!(
            out.as_slice(),
            [Notification::DisplayPositionChanged { highlighted: None, .. }]
        ));

        let out = confirm(&mut e, "e7e5");
        let highlighted = out.iter().find_map(|n| match n {
            Notification::DisplayPositionChanged { highlighted, .. } => Some(*highlighted),
            _ => None,
        });
        assert!(matches!(highlighted, Some(Some(m)) if m.mover == Player::Black));
    }

    #[test]
    fn no_highlight_at_cursor_zero() {
        let mut e = engine(GameDescriptor::observed());
        confirm(&mut e, "e2e4");
        e.handle(Event::LocalHistoryNavigated { index: 0 }).unwrap();
        assert_eq!(e.displayed(), (Position::standard(), None));
    }

    #[test]
    fn browsing_refuses_moves_and_is_not_editable() {
        let mut e = engine(GameDescriptor::played(Player::White));
        let e4 = mv(&e, "e2e4");
        e.handle(Event::LocalMoveSubmitted { mv: e4 }).unwrap();
        e.handle(Event::MoveConfirmed { mv: e4 }).unwrap();
        confirm(&mut e, "e7e5");
        e.handle(Event::LocalHistoryNavigated { index: 1 }).unwrap();
        assert!(!e.is_editable());

        let nf3 = parse_coordinate_move(e.timeline().position(), "g1f3").unwrap();
        assert_eq!(
            e.handle(Event::LocalMoveSubmitted { mv: nf3 }),
            Err(EngineError::NotAtTail { cursor: 1, len: 2 })
        );
        assert_eq!(
            e.handle(Event::LocalHistoryNavigated { index: 3 }),
            Err(EngineError::InvalidNavigation { index: 3, len: 2 })
        );
        assert_eq!(e.cursor(), 1);
    }

    #[test]
    fn game_end_blocks_input_and_keeps_premove() {
        let mut e = engine(GameDescriptor::played(Player::Black));
        let black = parse_coordinate_move(
            &Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b").unwrap(),
            "e7e5",
        )
        .unwrap();
        e.handle(Event::LocalMoveSubmitted { mv: black }).unwrap();
        let out = e.handle(Event::GameEnded).unwrap();
        assert!(!out
            .iter()
            .any(|n| matches!(n, Notification::SquarePendingChanged { .. })));
        assert!(!e.is_active());
        assert!(!e.is_editable());
        assert_eq!(
            e.handle(Event::LocalMoveSubmitted { mv: black }),
            Err(EngineError::Inactive)
        );
        assert_eq!(e.queued(), Some(&black));

        // A late confirmation still lands, but the premove is never sent.
        let out = confirm(&mut e, "e2e4");
        assert!(submits(&out).is_empty());
        assert_eq!(e.timeline().len(), 1);
        assert_eq!(e.queued(), Some(&black));
        assert_eq!(e.in_flight(), None);
    }

    #[test]
    fn reset_reactivates_and_adopts_descriptor() {
        let mut e = engine(GameDescriptor::played(Player::White));
        e.handle(Event::GameEnded).unwrap();
        let out = e
            .handle(Event::GameReset {
                position: Position::standard(),
                descriptor: GameDescriptor::examined(),
            })
            .unwrap();
        assert!(e.is_active());
        assert_eq!(e.descriptor().kind, GameKind::ExaminedByUser);
        assert!(out.contains(&Notification::MoveListChanged { moves: vec![] }));
    }

    #[test]
    fn takeback_beyond_length_forces_resync() {
        let mut e = engine(GameDescriptor::observed());
        confirm(&mut e, "e2e4");
        let out = e.handle(Event::TakebackOccurred { plies: 3 }).unwrap();
        assert!(matches!(out.last(), Some(Notification::ResyncRequested { .. })));
        assert_eq!(e.timeline().len(), 0);
        assert_eq!(e.cursor(), 0);
    }

    #[test]
    fn cancel_without_premove_is_silent() {
        let mut e = engine(GameDescriptor::played(Player::White));
        assert_eq!(e.handle(Event::LocalMoveCancelled).unwrap(), vec![]);
    }

    #[test]
    fn clock_adjust_and_tick_surface_as_clock_display() {
        let sched = ManualScheduler::new();
        let wall = ManualWallClock::at(1_000);
        let clock = ClockEngine::new(Box::new(sched.clone()), Box::new(wall.clone()));
        let mut e = ReconciliationEngine::new(
            GameDescriptor::played(Player::White),
            EngineConfig::default(),
            clock,
        );
        let out = e
            .handle(Event::ClockAdjusted {
                side: Player::White,
                remaining_ms: 60_000,
                running: true,
            })
            .unwrap();
        assert_eq!(
            out,
            vec![Notification::ClockDisplayChanged {
                side: Player::White,
                remaining_ms: 60_000,
                running: true
            }]
        );
        let out = e.handle(Event::TimerTick { now_ms: 1_100 }).unwrap();
        assert_eq!(
            out,
            vec![Notification::ClockDisplayChanged {
                side: Player::White,
                remaining_ms: 59_900,
                running: true
            }]
        );

        // Submitting pauses; the paused tick is stale.
        let e4 = mv(&e, "e2e4");
        e.handle(Event::LocalMoveSubmitted { mv: e4 }).unwrap();
        assert!(!sched.log().running);
        assert!(e.handle(Event::TimerTick { now_ms: 1_200 }).unwrap().is_empty());

        // Rejection resumes.
        e.handle(Event::MoveRejected).unwrap();
        assert!(sched.log().running);
    }
}
