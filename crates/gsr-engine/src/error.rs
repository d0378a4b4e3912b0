use gsr_position::{ApplyError, Move};
use gsr_timeline::NavigationError;

use crate::GameKind;

/// Local input the engine refused. State is unchanged and nothing was sent.
///
/// Server-side trouble never shows up here: rejections are a normal
/// transition and protocol inconsistencies are handled by a forced resync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The game has ended.
    Inactive,
    /// The user is browsing history; moves are only accepted at the tail.
    NotAtTail { cursor: usize, len: usize },
    /// The piece belongs to a side the user may not move in this game.
    MoveNotPermitted { mv: Move, kind: GameKind },
    /// Out-of-turn move while premoves are switched off.
    PremoveDisabled { mv: Move },
    /// The move does not fit the position it would be played on.
    MoveDoesNotApply(ApplyError),
    InvalidNavigation { index: usize, len: usize },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Inactive => write!(f, "game is over; local moves are not accepted"),
            EngineError::NotAtTail { cursor, len } => write!(
                f,
                "board shows move {cursor} of {len}; return to the latest position to move"
            ),
            EngineError::MoveNotPermitted { mv, kind } => {
                write!(f, "move {mv} is not permitted in a {kind:?} game")
            }
            EngineError::PremoveDisabled { mv } => {
                write!(f, "move {mv} entered out of turn and premoves are disabled")
            }
            EngineError::MoveDoesNotApply(e) => write!(f, "move does not apply: {e}"),
            EngineError::InvalidNavigation { index, len } => {
                write!(f, "history index {index} is outside 0..={len}")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::MoveDoesNotApply(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NavigationError> for EngineError {
    fn from(e: NavigationError) -> Self {
        EngineError::InvalidNavigation {
            index: e.index,
            len: e.len,
        }
    }
}

impl From<ApplyError> for EngineError {
    fn from(e: ApplyError) -> Self {
        EngineError::MoveDoesNotApply(e)
    }
}
