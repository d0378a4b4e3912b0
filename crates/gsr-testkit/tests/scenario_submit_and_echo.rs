//! Scenario A: a move submitted on the user's turn goes in flight, and the
//! server's echo settles it.
//!
//! # Invariant under test
//! Exactly one `SubmitMoveToServer` per local move; the echo neither
//! re-submits nor triggers an opponent-move effect.

use gsr_engine::{Event, GameDescriptor, PendingState};
use gsr_position::{Player, Position};
use gsr_testkit::Harness;

#[test]
fn first_mover_submits_and_server_confirms() {
    let mut h = Harness::new(GameDescriptor::played(Player::White));

    let m1 = h.submit("e2e4").unwrap();
    assert_eq!(h.engine().pending(), &PendingState::AwaitingConfirmation { in_flight: m1 });
    assert_eq!(h.sink.submitted(), vec![m1]);

    // The board already shows the move while the server thinks.
    let shown = h.sink.last_display().unwrap().0.clone();
    assert_eq!(shown, Position::standard().apply_move(&m1).unwrap());
    assert_eq!(h.engine().timeline().len(), 0);

    h.sink.clear();
    h.send(Event::MoveConfirmed { mv: m1 }).unwrap();

    assert!(h.engine().pending().is_settled());
    assert_eq!(h.engine().timeline().len(), 1);
    assert_eq!(h.engine().cursor(), 1);
    assert!(h.sink.submitted().is_empty(), "echo must not re-submit");
    assert!(h.sink.effects().is_empty(), "echo must not replay the move effect");
    assert_eq!(h.sink.last_move_list(), Some(&[m1][..]));
}

#[test]
fn opponent_reply_gets_an_effect_and_returns_the_turn() {
    let mut h = Harness::new(GameDescriptor::played(Player::White));
    let m1 = h.submit("e2e4").unwrap();
    h.send(Event::MoveConfirmed { mv: m1 }).unwrap();
    assert!(!h.engine().is_user_turn());

    h.sink.clear();
    let reply = h.confirm("c7c5").unwrap();
    assert_eq!(h.sink.effects(), vec![(reply, false)]);
    assert!(h.engine().is_user_turn());
    assert!(h.engine().is_editable());
}
