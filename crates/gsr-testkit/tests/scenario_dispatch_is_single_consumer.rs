//! Scenario: events from all three sources share one queue.
//!
//! # Invariants under test
//! - Queued events are handled strictly in arrival order.
//! - A refused local event is reported but does not stop the drain.
//! - Replaying the same event log gives the same notifications.

use gsr_engine::{Dispatcher, EngineError, Event, GameDescriptor, ReconciliationEngine};
use gsr_clock::{ClockEngine, ManualScheduler, ManualWallClock};
use gsr_config::EngineConfig;
use gsr_position::{Player, Position};
use gsr_testkit::{line, RecordingSink};

fn dispatcher() -> Dispatcher {
    let clock = ClockEngine::new(
        Box::new(ManualScheduler::new()),
        Box::new(ManualWallClock::at(0)),
    );
    Dispatcher::new(ReconciliationEngine::new(
        GameDescriptor::played(Player::White),
        EngineConfig::default(),
        clock,
    ))
}

fn script() -> Vec<Event> {
    let moves = line(&Position::standard(), &["e2e4", "e7e5", "g1f3"]).unwrap();
    vec![
        Event::ClockAdjusted {
            side: Player::White,
            remaining_ms: 60_000,
            running: true,
        },
        Event::LocalMoveSubmitted { mv: moves[0] },
        Event::TimerTick { now_ms: 100 },
        Event::MoveConfirmed { mv: moves[0] },
        // Navigating past the tail is refused.
        Event::LocalHistoryNavigated { index: 7 },
        Event::MoveConfirmed { mv: moves[1] },
        Event::LocalMoveSubmitted { mv: moves[2] },
    ]
}

#[test]
fn drain_handles_in_order_and_collects_refusals() {
    let mut d = dispatcher();
    for ev in script() {
        d.enqueue(ev);
    }
    assert_eq!(d.queued_events(), 7);

    let mut sink = RecordingSink::default();
    let refusals = d.drain(&mut sink);

    assert_eq!(d.queued_events(), 0);
    assert_eq!(refusals.len(), 1);
    assert_eq!(
        refusals[0].error,
        EngineError::InvalidNavigation { index: 7, len: 1 }
    );
    assert_eq!(d.engine().timeline().len(), 2);
    assert_eq!(sink.submitted().len(), 2);
}

#[test]
fn same_log_same_notifications() {
    let run = || {
        let mut d = dispatcher();
        let mut sink = RecordingSink::default();
        for ev in script() {
            d.enqueue(ev);
        }
        d.drain(&mut sink);
        sink.to_json_lines().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn dispatch_returns_the_refusal() {
    let mut d = dispatcher();
    let mut sink = RecordingSink::default();
    d.dispatch(Event::GameEnded, &mut sink).unwrap();
    let e4 = line(&Position::standard(), &["e2e4"]).unwrap()[0];
    assert_eq!(
        d.dispatch(Event::LocalMoveSubmitted { mv: e4 }, &mut sink),
        Err(EngineError::Inactive)
    );
}
