//! Scenario: clock interpolation between server adjustments.
//!
//! # Invariants under test
//! - Only the authoritative side to move is decremented; browsing has no say.
//! - Submitting pauses ticking; a rejection resumes it.
//! - A confirmed move holds the clock until the next adjustment.
//! - After game end every tick is stale.

use gsr_engine::{Event, GameDescriptor, Notification};
use gsr_position::Player;
use gsr_testkit::Harness;

fn clock_readings(seen: &[Notification]) -> Vec<(Player, i64)> {
    seen.iter()
        .filter_map(|n| match n {
            Notification::ClockDisplayChanged {
                side, remaining_ms, ..
            } => Some((*side, *remaining_ms)),
            _ => None,
        })
        .collect()
}

fn adjust(h: &mut Harness, side: Player, remaining_ms: i64, running: bool) {
    h.send(Event::ClockAdjusted {
        side,
        remaining_ms,
        running,
    })
    .unwrap();
}

#[test]
fn browsing_does_not_change_which_clock_runs() {
    let mut h = Harness::new(GameDescriptor::observed());
    h.play(&["e2e4", "e7e5", "g1f3"]).unwrap();
    adjust(&mut h, Player::White, 60_000, false);
    adjust(&mut h, Player::Black, 60_000, true);
    assert_eq!(h.scheduler.log().initial_delay_ms, 0);

    h.send(Event::LocalHistoryNavigated { index: 0 }).unwrap();
    h.sink.clear();
    h.tick_after(100).unwrap();
    h.tick_after(100).unwrap();
    assert_eq!(
        clock_readings(&h.sink.seen),
        vec![(Player::Black, 59_900), (Player::Black, 59_800)]
    );
}

#[test]
fn submission_pauses_and_rejection_resumes() {
    let mut h = Harness::new(GameDescriptor::played(Player::White));
    adjust(&mut h, Player::White, 30_050, true);
    assert_eq!(h.scheduler.log().initial_delay_ms, 50);

    h.submit("e2e4").unwrap();
    assert!(!h.scheduler.log().running);
    h.sink.clear();
    h.tick_after(100).unwrap();
    assert!(clock_readings(&h.sink.seen).is_empty(), "paused ticks are stale");

    h.send(Event::MoveRejected).unwrap();
    assert!(h.scheduler.log().running);
    h.tick_after(100).unwrap();
    // The server's clock kept running during the round trip.
    assert_eq!(clock_readings(&h.sink.seen), vec![(Player::White, 29_850)]);
}

#[test]
fn confirmation_holds_until_next_adjustment() {
    let mut h = Harness::new(GameDescriptor::played(Player::White));
    adjust(&mut h, Player::White, 30_000, true);
    let e4 = h.submit("e2e4").unwrap();
    h.send(Event::MoveConfirmed { mv: e4 }).unwrap();
    assert!(!h.scheduler.log().running);

    adjust(&mut h, Player::White, 29_700, false);
    adjust(&mut h, Player::Black, 30_000, true);
    assert!(h.scheduler.log().running);
    h.sink.clear();
    h.tick_after(250).unwrap();
    assert_eq!(clock_readings(&h.sink.seen), vec![(Player::Black, 29_750)]);
}

#[test]
fn ticks_after_game_end_are_ignored() {
    let mut h = Harness::new(GameDescriptor::observed());
    adjust(&mut h, Player::White, 10_000, true);
    h.send(Event::GameEnded).unwrap();
    assert!(!h.scheduler.log().running);
    h.sink.clear();
    h.tick_after(100).unwrap();
    assert!(h.sink.seen.is_empty());
}

#[test]
fn configured_interval_reaches_the_scheduler() {
    let mut h = Harness::with_config(
        GameDescriptor::observed(),
        gsr_config::EngineConfig {
            tick_interval_ms: 1_000,
            ..Default::default()
        },
    );
    adjust(&mut h, Player::White, 59_250, true);
    let log = h.scheduler.log();
    assert_eq!(log.interval_ms, 1_000);
    assert_eq!(log.initial_delay_ms, 250);
}
