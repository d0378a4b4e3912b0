//! Pending-move state machine.
//!
//! # Design
//!
//! The in-flight move and the queued premove are never tracked as separate
//! flags. [`PendingState`] names the four legal combinations and
//! [`PendingState::apply`] is the only way to move between them. Every
//! transition reports its side effects in a [`PendingOutcome`]; the engine
//! turns those into notifications.
//!
//! ```text
//!              local (user's turn)                    confirm (echo / superseded)
//!   Settled ──────────────────────► AwaitingConfirmation ─────────────► Settled
//!     │  ▲                               │        ▲
//!     │  │ cancel           local (queue)│        │ cancel
//!     ▼  │                               ▼        │
//!   Queued ───── confirm, mover to move ─► AwaitingConfirmationWithQueued
//!          (promote: submit the premove)
//! ```
//!
//! Reject, reset and takeback collapse every state to `Settled`.

use gsr_position::{Move, Player, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingState {
    /// Nothing sent, nothing queued.
    #[default]
    Settled,
    /// A premove entered out of turn while nothing was in flight.
    Queued { queued: Move },
    AwaitingConfirmation { in_flight: Move },
    AwaitingConfirmationWithQueued { in_flight: Move, queued: Move },
}

impl PendingState {
    pub fn in_flight(&self) -> Option<&Move> {
        match self {
            PendingState::AwaitingConfirmation { in_flight }
            | PendingState::AwaitingConfirmationWithQueued { in_flight, .. } => Some(in_flight),
            _ => None,
        }
    }

    pub fn queued(&self) -> Option<&Move> {
        match self {
            PendingState::Queued { queued }
            | PendingState::AwaitingConfirmationWithQueued { queued, .. } => Some(queued),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, PendingState::Settled)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PendingState::Settled => "settled",
            PendingState::Queued { .. } => "queued",
            PendingState::AwaitingConfirmation { .. } => "awaiting_confirmation",
            PendingState::AwaitingConfirmationWithQueued { .. } => {
                "awaiting_confirmation_with_queued"
            }
        }
    }

    /// Apply `event` and return the side effects of the transition.
    pub(crate) fn apply(&mut self, event: PendingEvent) -> PendingOutcome {
        use PendingEvent::*;
        use PendingState::*;

        let mut out = PendingOutcome::default();
        let next = match (*self, event) {
            // ------------------------------------------------------------------
            // Local input
            // ------------------------------------------------------------------
            (Settled, Local { mv, users_turn: true }) => {
                out.submit = Some(mv);
                AwaitingConfirmation { in_flight: mv }
            }
            // A direct move while a premove waits replaces the premove.
            (Queued { queued }, Local { mv, users_turn: true }) => {
                out.unshade = Some(queued.destination);
                out.submit = Some(mv);
                AwaitingConfirmation { in_flight: mv }
            }
            (Settled, Local { mv, users_turn: false }) => {
                out.shade = Some(mv.destination);
                Queued { queued: mv }
            }
            (Queued { queued }, Local { mv, users_turn: false }) => {
                out.unshade = Some(queued.destination);
                out.shade = Some(mv.destination);
                Queued { queued: mv }
            }
            // Anything entered while a move is in flight is queued.
            (AwaitingConfirmation { in_flight }, Local { mv, .. }) => {
                out.shade = Some(mv.destination);
                AwaitingConfirmationWithQueued { in_flight, queued: mv }
            }
            (AwaitingConfirmationWithQueued { in_flight, queued }, Local { mv, .. }) => {
                out.unshade = Some(queued.destination);
                out.shade = Some(mv.destination);
                AwaitingConfirmationWithQueued { in_flight, queued: mv }
            }

            (Queued { queued }, Cancel) => {
                out.unshade = Some(queued.destination);
                Settled
            }
            (AwaitingConfirmationWithQueued { in_flight, queued }, Cancel) => {
                out.unshade = Some(queued.destination);
                AwaitingConfirmation { in_flight }
            }
            (Settled | AwaitingConfirmation { .. }, Cancel) => *self,

            // ------------------------------------------------------------------
            // Server confirmation. Any confirmation ends the in-flight move:
            // either it is the echo, or the server moved that side some other
            // way and our move is superseded.
            // ------------------------------------------------------------------
            (state, Confirmed { mv, side_to_move, promote }) => {
                if let Some(in_flight) = state.in_flight() {
                    if *in_flight == mv {
                        out.echo = true;
                    } else {
                        out.superseded = Some(*in_flight);
                    }
                }
                match state.queued() {
                    Some(queued) if promote && queued.mover == side_to_move => {
                        out.unshade = Some(queued.destination);
                        out.submit = Some(*queued);
                        out.promoted = true;
                        AwaitingConfirmation { in_flight: *queued }
                    }
                    Some(queued) => Queued { queued: *queued },
                    None => Settled,
                }
            }

            // ------------------------------------------------------------------
            // Rejection: only meaningful with something in flight.
            // ------------------------------------------------------------------
            (AwaitingConfirmation { .. }, Rejected) => {
                out.rejected = true;
                Settled
            }
            (AwaitingConfirmationWithQueued { queued, .. }, Rejected) => {
                out.unshade = Some(queued.destination);
                out.rejected = true;
                Settled
            }
            (Settled | Queued { .. }, Rejected) => *self,

            // ------------------------------------------------------------------
            // Reset / takeback / forced resync: nothing survives.
            // ------------------------------------------------------------------
            (state, Clear) => {
                out.unshade = state.queued().map(|q| q.destination);
                Settled
            }
        };
        out.changed = next != *self;
        *self = next;
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingEvent {
    /// A validated local move. `users_turn` is false when the authoritative
    /// side to move is not the user's, which makes the move a premove.
    Local { mv: Move, users_turn: bool },
    Cancel,
    /// `side_to_move` is the authoritative side after appending `mv`. With
    /// `promote` false a matching premove stays queued.
    Confirmed {
        mv: Move,
        side_to_move: Player,
        promote: bool,
    },
    Rejected,
    Clear,
}

/// Side effects of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PendingOutcome {
    pub submit: Option<Move>,
    pub shade: Option<Square>,
    pub unshade: Option<Square>,
    pub echo: bool,
    pub superseded: Option<Move>,
    pub promoted: bool,
    pub rejected: bool,
    pub changed: bool,
}
