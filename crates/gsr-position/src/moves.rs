use serde::{Deserialize, Serialize};

use crate::{PieceKind, Player, Square};

/// A single ply as produced by the rules collaborator.
///
/// Immutable once built. The flags describe the move; they are not checked
/// against any rules here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub mover: Player,
    pub origin: Square,
    pub destination: Square,
    /// Kind of the piece standing on `origin` before the move.
    pub piece: PieceKind,
    #[serde(default)]
    pub is_capture: bool,
    #[serde(default)]
    pub is_castle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(mover: Player, origin: Square, destination: Square, piece: PieceKind) -> Self {
        Self {
            mover,
            origin,
            destination,
            piece,
            is_capture: false,
            is_castle: false,
            promotion: None,
        }
    }

    pub fn capturing(mut self) -> Self {
        self.is_capture = true;
        self
    }

    pub fn castling(mut self) -> Self {
        self.is_castle = true;
        self
    }

    pub fn promoting_to(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_castle {
            let long = self.destination.file() < self.origin.file();
            return f.write_str(if long { "O-O-O" } else { "O-O" });
        }
        let sep = if self.is_capture { 'x' } else { '-' };
        if self.piece != PieceKind::Pawn {
            write!(f, "{}", self.piece.letter().to_ascii_uppercase())?;
        }
        write!(f, "{}{}{}", self.origin, sep, self.destination)?;
        if let Some(p) = self.promotion {
            write!(f, "={}", p.letter().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    #[test]
    fn display_reads_like_long_algebraic() {
        let m = Move::new(Player::White, sq("g1"), sq("f3"), PieceKind::Knight);
        assert_eq!(m.to_string(), "Ng1-f3");

        let x = Move::new(Player::Black, sq("d5"), sq("e4"), PieceKind::Pawn).capturing();
        assert_eq!(x.to_string(), "d5xe4");

        let ooo = Move::new(Player::White, sq("e1"), sq("c1"), PieceKind::King).castling();
        assert_eq!(ooo.to_string(), "O-O-O");

        let promo =
            Move::new(Player::White, sq("e7"), sq("e8"), PieceKind::Pawn).promoting_to(PieceKind::Queen);
        assert_eq!(promo.to_string(), "e7-e8=Q");
    }

    #[test]
    fn json_form_uses_algebraic_squares_and_defaults_flags() {
        let raw = r#"{"mover":"white","origin":"e2","destination":"e4","piece":"pawn"}"#;
        let m: Move = serde_json::from_str(raw).unwrap();
        assert_eq!(m, Move::new(Player::White, sq("e2"), sq("e4"), PieceKind::Pawn));

        let back = serde_json::to_string(&m).unwrap();
        assert!(back.contains("\"origin\":\"e2\""));
        assert!(!back.contains("promotion"));
    }
}
