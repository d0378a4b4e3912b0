//! gsr-position
//!
//! Board state for the reconciliation engine.
//!
//! - `Position` is a plain value: applying a move returns a new position and
//!   never touches the source.
//! - `replay` is the only way history turns into a position; every other crate
//!   derives snapshots through it.
//! - No legality checking. Moves arrive pre-validated by the rules collaborator;
//!   a move that does not fit the board is reported as [`ApplyError`].

mod coords;
mod moves;
mod position;
mod square;
mod types;

pub use coords::{parse_coordinate_move, CoordinateMoveError};
pub use moves::Move;
pub use position::{replay, ApplyError, FenError, Position};
pub use square::{Square, SquareParseError};
pub use types::{Piece, PieceKind, Player};
