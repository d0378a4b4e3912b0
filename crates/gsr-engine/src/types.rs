use gsr_config::EngineConfig;
use gsr_position::{Move, Player, Position, Square};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Game descriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// The user is one of the two players.
    PlayedByUser,
    /// The user drives both sides (analysis / examination).
    ExaminedByUser,
    Observed,
    /// A local board with no server game behind it.
    Isolated,
}

/// Fixed for the lifetime of one game; replaced only by a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDescriptor {
    pub kind: GameKind,
    #[serde(default)]
    pub user_side: Option<Player>,
    #[serde(default)]
    pub initial_position: Position,
}

impl GameDescriptor {
    pub fn played(user_side: Player) -> Self {
        Self {
            kind: GameKind::PlayedByUser,
            user_side: Some(user_side),
            initial_position: Position::standard(),
        }
    }

    pub fn examined() -> Self {
        Self {
            kind: GameKind::ExaminedByUser,
            user_side: None,
            initial_position: Position::standard(),
        }
    }

    pub fn observed() -> Self {
        Self {
            kind: GameKind::Observed,
            user_side: None,
            initial_position: Position::standard(),
        }
    }

    pub fn starting_from(mut self, position: Position) -> Self {
        self.initial_position = position;
        self
    }
}

/// Which pieces the board lets the user pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInputMode {
    /// Only this side's pieces (a played game).
    Side(Player),
    /// Whichever side is to move on the board (an examined game).
    SideToMove,
    None,
}

/// Sound / animation category for a completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Capture,
    Castling,
    Move,
}

impl EffectKind {
    pub fn of(mv: &Move) -> Self {
        if mv.is_capture {
            EffectKind::Capture
        } else if mv.is_castle {
            EffectKind::Castling
        } else {
            EffectKind::Move
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// Everything that can happen to the engine. Server events, local input and
/// timer ticks share this one type so they can be serialized onto one queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    // server
    GameReset {
        position: Position,
        descriptor: GameDescriptor,
    },
    MoveConfirmed {
        mv: Move,
    },
    /// Implicitly about the current in-flight move.
    MoveRejected,
    TakebackOccurred {
        plies: usize,
    },
    ClockAdjusted {
        side: Player,
        remaining_ms: i64,
        running: bool,
    },
    GameEnded,

    // local input
    LocalMoveSubmitted {
        mv: Move,
    },
    LocalHistoryNavigated {
        index: usize,
    },
    LocalMoveCancelled,

    // timer
    TimerTick {
        now_ms: u64,
    },

    ConfigurationChanged {
        config: EngineConfig,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::GameReset { .. } => "game_reset",
            Event::MoveConfirmed { .. } => "move_confirmed",
            Event::MoveRejected => "move_rejected",
            Event::TakebackOccurred { .. } => "takeback_occurred",
            Event::ClockAdjusted { .. } => "clock_adjusted",
            Event::GameEnded => "game_ended",
            Event::LocalMoveSubmitted { .. } => "local_move_submitted",
            Event::LocalHistoryNavigated { .. } => "local_history_navigated",
            Event::LocalMoveCancelled => "local_move_cancelled",
            Event::TimerTick { .. } => "timer_tick",
            Event::ConfigurationChanged { .. } => "configuration_changed",
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// The only notification that should cause a network send.
    SubmitMoveToServer { mv: Move },
    DisplayPositionChanged {
        position: Position,
        highlighted: Option<Move>,
    },
    MoveListChanged { moves: Vec<Move> },
    ClockDisplayChanged {
        side: Player,
        remaining_ms: i64,
        running: bool,
    },
    /// Premove shading.
    SquarePendingChanged { square: Square, pending: bool },
    MoveCompletedEffect {
        mv: Move,
        own: bool,
        effect: EffectKind,
    },
    /// Local state was thrown away because it no longer matched the server.
    ResyncRequested { reason: String },
}
