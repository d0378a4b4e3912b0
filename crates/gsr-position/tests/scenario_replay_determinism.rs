//! Scenario: replaying the same line from the same start is deterministic and
//! side-effect free on the source position.

use gsr_position::{parse_coordinate_move, replay, Move, Position};

fn line(start: &Position, coords: &[&str]) -> Vec<Move> {
    let mut pos = start.clone();
    let mut out = Vec::new();
    for c in coords {
        let mv = parse_coordinate_move(&pos, c).unwrap();
        pos = pos.apply_move(&mv).unwrap();
        out.push(mv);
    }
    out
}

#[test]
fn every_prefix_replays_identically() {
    let start = Position::standard();
    let moves = line(
        &start,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1", "f8c5"],
    );

    for n in 0..=moves.len() {
        let a = replay(&start, &moves[..n]).unwrap();
        let b = replay(&start, &moves[..n]).unwrap();
        assert_eq!(a, b, "prefix {n} must replay identically");
    }
    assert_eq!(start, Position::standard(), "replay must not mutate the start");

    let end = replay(&start, &moves).unwrap();
    assert_eq!(
        end.to_fen(),
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 w"
    );
}

#[test]
fn position_json_is_its_fen() {
    let p = Position::standard();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "\"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w\"");
    let back: Position = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    assert!(serde_json::from_str::<Position>("\"not a fen\"").is_err());
}
