use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only settings snapshot handed to the reconciliation engine at
/// construction and replaced wholesale on a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Highlight the user's own last move on the board.
    pub highlight_own_moves: bool,
    /// Emit a completion effect when the user submits a move.
    pub own_move_effects: bool,
    /// Accept moves entered out of turn as premoves.
    pub premove: bool,
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highlight_own_moves: true,
            own_move_effects: true,
            premove: true,
            tick_interval_ms: 100,
        }
    }
}

impl EngineConfig {
    /// All keys optional; a missing key keeps its default.
    ///
    /// - board.highlight_own_moves (bool)
    /// - board.own_move_effects (bool)
    /// - moves.premove (bool)
    /// - clock.tick_interval_ms (positive integer)
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let d = Self::default();
        let tick_interval_ms = match cfg.pointer("/clock/tick_interval_ms") {
            None | Some(Value::Null) => d.tick_interval_ms,
            Some(v) => v
                .as_u64()
                .ok_or_else(|| anyhow!("clock.tick_interval_ms must be a positive integer (got {v})"))?,
        };
        if tick_interval_ms == 0 {
            return Err(anyhow!("clock.tick_interval_ms must be > 0"));
        }

        Ok(Self {
            highlight_own_moves: read_bool(cfg, "/board/highlight_own_moves", d.highlight_own_moves)?,
            own_move_effects: read_bool(cfg, "/board/own_move_effects", d.own_move_effects)?,
            premove: read_bool(cfg, "/moves/premove", d.premove)?,
            tick_interval_ms,
        })
    }
}

fn read_bool(cfg: &Value, pointer: &str, default: bool) -> Result<bool> {
    match cfg.pointer(pointer) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(anyhow!(
            "{} must be a boolean (got {other})",
            pointer.trim_start_matches('/').replace('/', ".")
        )),
    }
}
