//! JSONL event scripts.
//!
//! One object per line: `{"at_ms": 1200, "event": {"type": "move_confirmed", ...}}`.
//! Blank lines and lines starting with `#` are skipped. `at_ms` is relative to
//! the start of the script and must not go backwards.

use anyhow::{bail, Context, Result};
use gsr_engine::Event;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptLine {
    pub at_ms: u64,
    pub event: Event,
}

pub fn load_script(path: &str) -> Result<Vec<ScriptLine>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read script: {path}"))?;
    parse_script(&raw).with_context(|| format!("parse script: {path}"))
}

pub fn parse_script(raw: &str) -> Result<Vec<ScriptLine>> {
    let mut out: Vec<ScriptLine> = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed: ScriptLine =
            serde_json::from_str(line).with_context(|| format!("line {}", i + 1))?;
        if let Some(prev) = out.last() {
            if parsed.at_ms < prev.at_ms {
                bail!(
                    "line {}: at_ms {} goes backwards (previous {})",
                    i + 1,
                    parsed.at_ms,
                    prev.at_ms
                );
            }
        }
        out.push(parsed);
    }
    Ok(out)
}
