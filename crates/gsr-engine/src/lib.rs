//! gsr-engine
//!
//! Client-side reconciliation between a remote authoritative game and the
//! local board.
//! - The server owns the move history; the client only ever appends what the
//!   server confirms.
//! - At most one move is in flight; a move entered out of turn waits as a
//!   premove until its side is to move.
//! - Browsing history never changes what is sent or how the clock runs.
//! - All input goes through [`ReconciliationEngine::handle`], fed by one
//!   [`Dispatcher`] queue.

mod dispatch;
mod engine;
mod error;
mod pending;
mod types;

pub use dispatch::{Dispatcher, NotificationSink, Refusal};
pub use engine::ReconciliationEngine;
pub use error::EngineError;
pub use pending::PendingState;
pub use types::{
    EffectKind, Event, GameDescriptor, GameKind, MoveInputMode, Notification,
};
