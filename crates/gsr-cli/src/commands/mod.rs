use std::io::Write;

use anyhow::{bail, Result};
use gsr_clock::ClockEngine;
use gsr_config::{
    load_layered_yaml, report_unused_keys, ConfigScope, EngineConfig, LoadedConfig,
    UnusedKeyPolicy,
};
use gsr_engine::{
    Dispatcher, GameDescriptor, Notification, NotificationSink, ReconciliationEngine, Refusal,
};
use tracing::{info, warn};

pub mod replay;
pub mod watch;

const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

pub fn config_hash(paths: &[String], policy: UnusedKeyPolicy) -> Result<()> {
    let loaded = load_layered_yaml(paths)?;
    report_unused_keys(ConfigScope::Cli, &loaded.config_json, policy)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

/// Settings a run needs, resolved from layered YAML (or defaults when no
/// paths were given).
pub struct RunSettings {
    pub config_hash: Option<String>,
    pub engine: EngineConfig,
    pub playback_speed: f64,
}

pub fn load_settings(paths: &[String]) -> Result<RunSettings> {
    if paths.is_empty() {
        return Ok(RunSettings {
            config_hash: None,
            engine: EngineConfig::default(),
            playback_speed: DEFAULT_PLAYBACK_SPEED,
        });
    }
    let loaded: LoadedConfig = load_layered_yaml(paths)?;
    report_unused_keys(ConfigScope::Cli, &loaded.config_json, UnusedKeyPolicy::Warn)?;
    let engine = EngineConfig::from_config_json(&loaded.config_json)?;
    let playback_speed = match loaded.config_json.pointer("/playback/speed") {
        None => DEFAULT_PLAYBACK_SPEED,
        Some(v) => match v.as_f64() {
            Some(s) => s,
            None => bail!("playback.speed must be a number"),
        },
    };
    Ok(RunSettings {
        config_hash: Some(loaded.config_hash),
        engine,
        playback_speed,
    })
}

/// Scripts are expected to open with `game_reset`; until then the engine
/// treats the session as an observed game from the standard position.
pub fn build_dispatcher(engine_config: EngineConfig, clock: ClockEngine) -> Dispatcher {
    Dispatcher::new(ReconciliationEngine::new(
        GameDescriptor::observed(),
        engine_config,
        clock,
    ))
}

/// Writes each notification as one JSON line. The first write error is kept
/// and reported by [`JsonLinesSink::finish`].
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: usize,
    error: Option<anyhow::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    /// Flushes and returns how many lines were written.
    pub fn finish(mut self) -> Result<usize> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.written)
    }
}

impl<W: Write> NotificationSink for JsonLinesSink<W> {
    fn deliver(&mut self, notification: Notification) {
        if self.error.is_some() {
            return;
        }
        let res = serde_json::to_string(&notification)
            .map_err(anyhow::Error::from)
            .and_then(|line| writeln!(self.out, "{line}").map_err(anyhow::Error::from));
        match res {
            Ok(()) => self.written += 1,
            Err(e) => self.error = Some(e),
        }
    }
}

pub fn log_refusals(at_ms: u64, refusals: &[Refusal]) {
    for r in refusals {
        warn!(at_ms, event = r.event.name(), error = %r.error, "script event refused");
    }
}

pub fn log_summary(
    run_id: &uuid::Uuid,
    events: usize,
    notifications: usize,
    refusals: usize,
    config_hash: Option<&str>,
) {
    info!(
        %run_id,
        events,
        notifications,
        refusals,
        config_hash = config_hash.unwrap_or("default"),
        finished_at = %chrono::Utc::now().to_rfc3339(),
        "run complete"
    );
}
