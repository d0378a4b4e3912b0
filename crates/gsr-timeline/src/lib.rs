//! gsr-timeline
//!
//! The authoritative record of confirmed moves and the read-only views built
//! on top of it.
//!
//! - `GameTimeline` is append-only except for takeback truncation, and every
//!   append is checked against the side to move.
//! - `HistoryNavigator` maps a display cursor to a snapshot. It holds no state.
//! - `movelist` lays the timeline out as numbered rows for the move-list view.

mod history;
mod movelist;
mod timeline;

pub use history::{HistoryNavigator, NavigationError, Snapshot};
pub use movelist::{cell_for_index, index_for_cell, move_list_rows, MoveListRow};
pub use timeline::{GameTimeline, TimelineError};
