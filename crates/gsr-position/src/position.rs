use serde::{Deserialize, Serialize};

use crate::{Move, Piece, PieceKind, Player, Square};

const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Piece placement plus side to move.
///
/// Serialized as the first two FEN fields (`"<placement> <w|b>"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    board: [Option<Piece>; 64],
    to_move: Player,
}

impl Position {
    /// An empty board with `to_move` to play.
    pub fn empty(to_move: Player) -> Self {
        Self {
            board: [None; 64],
            to_move,
        }
    }

    /// The standard chess starting position.
    pub fn standard() -> Self {
        match Self::from_fen(STANDARD_FEN) {
            Ok(p) => p,
            Err(e) => unreachable!("standard FEN must parse: {e}"),
        }
    }

    pub fn side_to_move(&self) -> Player {
        self.to_move
    }

    pub fn set_side_to_move(&mut self, p: Player) {
        self.to_move = p;
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn put(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.index()] = piece;
    }

    /// Occupied squares in a1..h8 order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board.iter().enumerate().filter_map(|(i, p)| {
            let piece = (*p)?;
            Square::from_index(i).map(|sq| (sq, piece))
        })
    }

    /// Overwrite this position with `other`.
    pub fn copy_from(&mut self, other: &Position) {
        self.board = other.board;
        self.to_move = other.to_move;
    }

    /// Apply `mv` and return the resulting position. `self` is left untouched.
    ///
    /// The side to move afterwards is always `mv.mover.opponent()`, so a
    /// premove can be shown on top of a position where it is not yet the
    /// mover's turn.
    ///
    /// # Errors
    /// [`ApplyError`] when the origin square does not hold the piece the move
    /// claims to move. Move legality is the rules collaborator's job, so this
    /// is always a contract violation upstream.
    pub fn apply_move(&self, mv: &Move) -> Result<Position, ApplyError> {
        let moving = self
            .piece_at(mv.origin)
            .ok_or(ApplyError::EmptyOrigin { mv: *mv })?;
        if moving.owner != mv.mover {
            return Err(ApplyError::WrongOwner {
                mv: *mv,
                found: moving.owner,
            });
        }
        if moving.kind != mv.piece {
            return Err(ApplyError::PieceMismatch {
                mv: *mv,
                found: moving.kind,
            });
        }

        let mut next = self.clone();

        // En passant: a pawn capture onto an empty square takes the pawn that
        // sits beside the origin on the destination file.
        if mv.piece == PieceKind::Pawn
            && mv.is_capture
            && mv.origin.file() != mv.destination.file()
            && self.piece_at(mv.destination).is_none()
        {
            if let Some(victim) = Square::new(mv.destination.file(), mv.origin.rank()) {
                next.put(victim, None);
            }
        }

        if mv.is_castle {
            let (rook_from, rook_to) =
                castle_rook_squares(mv).ok_or(ApplyError::BadCastle { mv: *mv })?;
            let rook = next
                .piece_at(rook_from)
                .filter(|p| p.kind == PieceKind::Rook && p.owner == mv.mover)
                .ok_or(ApplyError::BadCastle { mv: *mv })?;
            next.put(rook_from, None);
            next.put(rook_to, Some(rook));
        }

        let landed = match mv.promotion {
            Some(kind) => Piece::new(mv.mover, kind),
            None => moving,
        };
        next.put(mv.origin, None);
        next.put(mv.destination, Some(landed));
        next.to_move = mv.mover.opponent();
        Ok(next)
    }

    /// Parse the placement and side-to-move fields of a FEN record. Any later
    /// fields (castling rights, clocks) are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;
        let to_move = match fields.next() {
            None | Some("w") => Player::White,
            Some("b") => Player::Black,
            Some(other) => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut pos = Position::empty(to_move);
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(d) = c.to_digit(10) {
                    file += d as u8;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::BadPiece(c))?;
                    let sq = Square::new(file, rank).ok_or(FenError::RankWidth(rank + 1))?;
                    pos.put(sq, Some(piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth(rank + 1));
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth(rank + 1));
            }
        }
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            let mut gap = 0;
            for file in 0..8u8 {
                let piece = Square::new(file, rank).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some(p) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(match self.to_move {
            Player::White => 'w',
            Player::Black => 'b',
        });
        out
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl TryFrom<String> for Position {
    type Error = FenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Position::from_fen(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.to_fen()
    }
}

fn castle_rook_squares(mv: &Move) -> Option<(Square, Square)> {
    let from = mv.origin.file();
    let to = mv.destination.file();
    if to > from {
        Some((mv.origin.with_file(7)?, mv.destination.with_file(to - 1)?))
    } else if to < from {
        Some((mv.origin.with_file(0)?, mv.destination.with_file(to + 1)?))
    } else {
        None
    }
}

/// Replay `moves` from `initial`. Equivalent to folding [`Position::apply_move`].
pub fn replay(initial: &Position, moves: &[Move]) -> Result<Position, ApplyError> {
    let mut pos = initial.clone();
    for mv in moves {
        pos = pos.apply_move(mv)?;
    }
    Ok(pos)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A move that does not fit the position it was applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    EmptyOrigin { mv: Move },
    WrongOwner { mv: Move, found: Player },
    PieceMismatch { mv: Move, found: PieceKind },
    BadCastle { mv: Move },
}

impl ApplyError {
    pub fn mv(&self) -> &Move {
        match self {
            ApplyError::EmptyOrigin { mv }
            | ApplyError::WrongOwner { mv, .. }
            | ApplyError::PieceMismatch { mv, .. }
            | ApplyError::BadCastle { mv } => mv,
        }
    }
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyError::EmptyOrigin { mv } => {
                write!(f, "move {mv}: no piece on {}", mv.origin)
            }
            ApplyError::WrongOwner { mv, found } => {
                write!(f, "move {mv}: piece on {} belongs to {found}", mv.origin)
            }
            ApplyError::PieceMismatch { mv, found } => {
                write!(f, "move {mv}: piece on {} is a {found:?}", mv.origin)
            }
            ApplyError::BadCastle { mv } => {
                write!(f, "move {mv}: no rook to castle with")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    Empty,
    RankCount(usize),
    RankWidth(u8),
    BadPiece(char),
    BadSideToMove(String),
}

impl std::fmt::Display for FenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FenError::Empty => write!(f, "empty FEN"),
            FenError::RankCount(n) => write!(f, "FEN has {n} ranks, expected 8"),
            FenError::RankWidth(r) => write!(f, "FEN rank {r} does not cover 8 files"),
            FenError::BadPiece(c) => write!(f, "FEN has unknown piece letter '{c}'"),
            FenError::BadSideToMove(s) => write!(f, "FEN side to move '{s}' is not w or b"),
        }
    }
}

impl std::error::Error for FenError {}
