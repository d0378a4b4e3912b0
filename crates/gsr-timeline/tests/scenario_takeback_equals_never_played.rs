//! Scenario: takeback of k plies then replay gives the same position as if
//! the last k moves had never been appended, for every k.

use gsr_position::{parse_coordinate_move, replay, Position};
use gsr_timeline::{GameTimeline, HistoryNavigator};

const LINE: &[&str] = &[
    "e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6",
];

fn build(n: usize) -> GameTimeline {
    let mut tl = GameTimeline::new(Position::standard());
    for c in &LINE[..n] {
        let mv = parse_coordinate_move(tl.position(), c).unwrap();
        tl.append(mv).unwrap();
    }
    tl
}

#[test]
fn takeback_then_replay_matches_shorter_history() {
    for k in 0..=LINE.len() {
        let mut tl = build(LINE.len());
        tl.truncate(LINE.len() - k).unwrap();

        let expected = build(LINE.len() - k);
        assert_eq!(tl.position(), expected.position(), "k={k}");
        assert_eq!(
            &replay(tl.initial(), tl.moves()).unwrap(),
            expected.position(),
            "k={k}"
        );
    }
}

#[test]
fn navigator_snapshots_survive_unrelated_appends() {
    let mut tl = build(4);
    let before = HistoryNavigator::snapshot(&tl, 2).unwrap();
    let mv = parse_coordinate_move(tl.position(), LINE[4]).unwrap();
    tl.append(mv).unwrap();
    let after = HistoryNavigator::snapshot(&tl, 2).unwrap();
    assert_eq!(before, after);
}
