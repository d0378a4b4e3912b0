//! Coordinate notation (`e2e4`, `e7e8q`) resolved against a position.
//!
//! Fills in mover, piece kind and the capture / castle flags by looking at the
//! board. Nothing here checks legality.

use crate::{Move, PieceKind, Position, Square, SquareParseError};

pub fn parse_coordinate_move(position: &Position, text: &str) -> Result<Move, CoordinateMoveError> {
    let t = text.trim();
    if !(t.len() == 4 || t.len() == 5) || !t.is_ascii() {
        return Err(CoordinateMoveError::Malformed(t.to_string()));
    }
    let origin = Square::parse(&t[0..2]).map_err(CoordinateMoveError::Square)?;
    let destination = Square::parse(&t[2..4]).map_err(CoordinateMoveError::Square)?;
    let promotion = match t[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_letter(c) {
            Some(PieceKind::Pawn) | Some(PieceKind::King) | None => {
                return Err(CoordinateMoveError::Malformed(t.to_string()))
            }
            Some(k) => Some(k),
        },
    };

    let piece = position
        .piece_at(origin)
        .ok_or(CoordinateMoveError::NoPiece(origin))?;

    let target = position.piece_at(destination);
    let file_change = origin.file() != destination.file();
    let is_capture = match target {
        Some(p) => p.owner != piece.owner,
        None => piece.kind == PieceKind::Pawn && file_change,
    };
    let is_castle =
        piece.kind == PieceKind::King && origin.file().abs_diff(destination.file()) == 2;

    Ok(Move {
        mover: piece.owner,
        origin,
        destination,
        piece: piece.kind,
        is_capture,
        is_castle,
        promotion,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateMoveError {
    Malformed(String),
    Square(SquareParseError),
    NoPiece(Square),
}

impl std::fmt::Display for CoordinateMoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateMoveError::Malformed(s) => {
                write!(f, "'{s}' is not coordinate notation (e.g. e2e4, e7e8q)")
            }
            CoordinateMoveError::Square(e) => write!(f, "{e}"),
            CoordinateMoveError::NoPiece(sq) => write!(f, "no piece on {sq}"),
        }
    }
}

impl std::error::Error for CoordinateMoveError {}
