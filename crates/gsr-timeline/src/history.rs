use gsr_position::{Move, Position};

use crate::{GameTimeline, TimelineError};

/// What the board shows for a given display cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub index: usize,
    pub position: Position,
    /// The move that led into `position`; `None` at index 0.
    pub highlighted: Option<Move>,
}

/// Stateless mapping from a display cursor to a [`Snapshot`].
pub struct HistoryNavigator;

impl HistoryNavigator {
    /// # Errors
    /// [`NavigationError`] when `cursor > timeline.len()`.
    pub fn snapshot(timeline: &GameTimeline, cursor: usize) -> Result<Snapshot, NavigationError> {
        let position = timeline.position_at(cursor).map_err(|e| match e {
            TimelineError::IndexOutOfRange { index, len } => NavigationError { index, len },
            // position_at only replays a prefix of an already-validated
            // timeline, so the only failure mode is the range check.
            _ => NavigationError {
                index: cursor,
                len: timeline.len(),
            },
        })?;
        let highlighted = cursor
            .checked_sub(1)
            .and_then(|i| timeline.move_at(i))
            .copied();
        Ok(Snapshot {
            index: cursor,
            position,
            highlighted,
        })
    }

    pub fn is_valid(timeline: &GameTimeline, cursor: usize) -> bool {
        cursor <= timeline.len()
    }
}

/// A display cursor outside `0..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationError {
    pub index: usize,
    pub len: usize,
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "history index {} is outside 0..={}",
            self.index, self.len
        )
    }
}

impl std::error::Error for NavigationError {}
