use gsr_position::{replay, ApplyError, Move, Player, Position};

/// Ordered record of server-confirmed moves from an initial position.
///
/// # Invariant
/// `replay(initial, moves[0..n])` succeeds for every `0 <= n <= len()`.
/// `append` refuses anything that would break this, so the cached tail
/// position always equals the full replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTimeline {
    initial: Position,
    moves: Vec<Move>,
    tail: Position,
}

impl GameTimeline {
    pub fn new(initial: Position) -> Self {
        Self {
            tail: initial.clone(),
            initial,
            moves: Vec::new(),
        }
    }

    pub fn initial(&self) -> &Position {
        &self.initial
    }

    /// The authoritative position: all confirmed moves applied.
    pub fn position(&self) -> &Position {
        &self.tail
    }

    pub fn side_to_move(&self) -> Player {
        self.tail.side_to_move()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_at(&self, i: usize) -> Option<&Move> {
        self.moves.get(i)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Append a confirmed move.
    ///
    /// # Errors
    /// - [`TimelineError::OutOfTurn`] when `mv.mover` is not the side to move.
    /// - [`TimelineError::Apply`] when the move does not fit the tail position.
    ///
    /// The timeline is unchanged on error.
    pub fn append(&mut self, mv: Move) -> Result<(), TimelineError> {
        let expected = self.side_to_move();
        if mv.mover != expected {
            return Err(TimelineError::OutOfTurn {
                expected,
                got: mv.mover,
            });
        }
        let next = self.tail.apply_move(&mv).map_err(TimelineError::Apply)?;
        self.moves.push(mv);
        self.tail = next;
        Ok(())
    }

    /// Drop every move beyond `to_len` and recompute the tail from the initial
    /// position.
    pub fn truncate(&mut self, to_len: usize) -> Result<(), TimelineError> {
        if to_len > self.moves.len() {
            return Err(TimelineError::TruncateBeyondLength {
                requested: to_len,
                len: self.moves.len(),
            });
        }
        self.moves.truncate(to_len);
        self.tail = replay(&self.initial, &self.moves).map_err(TimelineError::Apply)?;
        Ok(())
    }

    /// Position after the first `n` moves.
    pub fn position_at(&self, n: usize) -> Result<Position, TimelineError> {
        if n > self.moves.len() {
            return Err(TimelineError::IndexOutOfRange {
                index: n,
                len: self.moves.len(),
            });
        }
        if n == self.moves.len() {
            return Ok(self.tail.clone());
        }
        replay(&self.initial, &self.moves[..n]).map_err(TimelineError::Apply)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    OutOfTurn { expected: Player, got: Player },
    Apply(ApplyError),
    TruncateBeyondLength { requested: usize, len: usize },
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::OutOfTurn { expected, got } => {
                write!(f, "out-of-turn move: {expected} to move, got a move by {got}")
            }
            TimelineError::Apply(e) => write!(f, "{e}"),
            TimelineError::TruncateBeyondLength { requested, len } => {
                write!(f, "cannot truncate to {requested} plies: timeline has {len}")
            }
            TimelineError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} outside 0..={len}")
            }
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimelineError::Apply(e) => Some(e),
            _ => None,
        }
    }
}
