//! Numbered move-list rows.
//!
//! One row per full move, a White cell and a Black cell. When the game starts
//! with Black to move the first White cell stays empty, so every later move
//! still lands in its natural column.

use gsr_position::{Move, Player};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveListRow {
    /// 1-based row number.
    pub number: usize,
    pub white: Option<Move>,
    pub black: Option<Move>,
}

fn starts_with_black(moves: &[Move]) -> bool {
    moves.first().map(|m| m.mover == Player::Black).unwrap_or(false)
}

pub fn move_list_rows(moves: &[Move]) -> Vec<MoveListRow> {
    let mut rows: Vec<MoveListRow> = Vec::new();
    for (i, mv) in moves.iter().enumerate() {
        let opens_row = rows.is_empty() || (mv.mover == Player::White && i > 0);
        if opens_row {
            rows.push(MoveListRow {
                number: rows.len() + 1,
                white: None,
                black: None,
            });
        }
        if let Some(row) = rows.last_mut() {
            match mv.mover {
                Player::White => row.white = Some(*mv),
                Player::Black => row.black = Some(*mv),
            }
        }
    }
    rows
}

/// Cell selected for display cursor `index`. Index 0 (the initial position)
/// has no cell.
pub fn cell_for_index(moves: &[Move], index: usize) -> Option<(usize, Player)> {
    if index == 0 || index > moves.len() {
        return None;
    }
    let visual = if starts_with_black(moves) { index + 1 } else { index };
    let row = (visual - 1) / 2;
    let column = if visual % 2 == 1 {
        Player::White
    } else {
        Player::Black
    };
    Some((row, column))
}

/// Display cursor for a selected cell. Selecting the empty cell just after the
/// last move means the tail; anything further out is `None`.
pub fn index_for_cell(moves: &[Move], row: usize, column: Player) -> Option<usize> {
    let col = match column {
        Player::White => 1,
        Player::Black => 2,
    };
    let mut index = col + row * 2;
    if starts_with_black(moves) {
        // The empty leading White cell has no position of its own.
        if index == 1 {
            return Some(0);
        }
        index -= 1;
    }
    if index == moves.len() + 1 {
        index -= 1;
    }
    if index > moves.len() {
        None
    } else {
        Some(index)
    }
}
